//! Calculator settings and their defaults
//!
//! Settings are the configured airframe and ramp defaults the fuel state is
//! validated against. They have no cross-field invariants; each field is
//! bounded independently where the user types it (see [`SettingsBounds`]).

use crate::core_types::{Fahrenheit, Pounds, PoundsPerGallon};
use serde::{Deserialize, Serialize};

/// Configured defaults
///
/// Deserialization fills any missing field from [`Settings::default`], so a
/// settings file written by an older version still loads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Usable fuel capacity (lbs)
    pub max_fuel_load: Pounds,
    /// Density at the 59°F standard day (lbs/gal)
    pub default_density: PoundsPerGallon,
    /// Load the preset button fills to (lbs)
    pub default_preset_load: Pounds,
    /// Standard temperature, always stored in °F
    pub default_temperature: Fahrenheit,
    /// Remember the fuel state between sessions
    pub persist_settings: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_fuel_load: Pounds::new(2704.0),
            default_density: PoundsPerGallon::STANDARD,
            default_preset_load: Pounds::new(2000.0),
            default_temperature: Fahrenheit::STANDARD_DAY,
            persist_settings: true,
        }
    }
}

/// Bounds the settings dialog clamps each field into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsBounds;

impl SettingsBounds {
    /// Lowest accepted default density (lbs/gal)
    pub const MIN_DENSITY: f64 = 5.0;
    /// Highest accepted default density (lbs/gal)
    pub const MAX_DENSITY: f64 = 8.0;
    /// Lowest accepted default temperature (°F)
    pub const MIN_TEMPERATURE_F: f64 = -22.0;
    /// Highest accepted default temperature (°F)
    pub const MAX_TEMPERATURE_F: f64 = 122.0;

    /// Capacity cannot be negative
    #[must_use]
    pub fn clamp_max_fuel_load(value: f64) -> Pounds {
        Pounds::new(value.max(0.0))
    }

    /// Default density is kept within 5..=8 lbs/gal
    #[must_use]
    pub fn clamp_default_density(value: f64) -> PoundsPerGallon {
        PoundsPerGallon::new(value.clamp(Self::MIN_DENSITY, Self::MAX_DENSITY))
    }

    /// Default temperature is kept within −22..=122 °F
    #[must_use]
    pub fn clamp_default_temperature(value: f64) -> Fahrenheit {
        Fahrenheit::new(value.clamp(Self::MIN_TEMPERATURE_F, Self::MAX_TEMPERATURE_F))
    }

    /// Preset load cannot be negative
    #[must_use]
    pub fn clamp_default_preset_load(value: f64) -> Pounds {
        Pounds::new(value.max(0.0))
    }
}

/// Owns the current [`Settings`]
///
/// Setters replace a single field and nothing else. Effects on the fuel
/// state (density re-derivation, clearing the stored snapshot) are applied
/// by [`crate::FuelCalculator`].
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: Settings,
}

impl SettingsStore {
    /// Create a store holding the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace every field at once
    pub fn replace(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Set the usable fuel capacity
    pub fn set_max_fuel_load(&mut self, value: Pounds) {
        self.settings.max_fuel_load = value;
    }

    /// Set the standard-day density
    pub fn set_default_density(&mut self, value: PoundsPerGallon) {
        self.settings.default_density = value;
    }

    /// Set the preset load
    pub fn set_default_preset_load(&mut self, value: Pounds) {
        self.settings.default_preset_load = value;
    }

    /// Set the standard temperature (°F)
    pub fn set_default_temperature(&mut self, value: Fahrenheit) {
        self.settings.default_temperature = value;
    }

    /// Enable or disable persistence of the fuel state
    pub fn set_persist_settings(&mut self, value: bool) {
        self.settings.persist_settings = value;
    }

    /// Restore the factory capacity (2704 lbs)
    pub fn reset_max_fuel_load(&mut self) {
        self.settings.max_fuel_load = Settings::default().max_fuel_load;
    }

    /// Restore the factory density (6.7 lbs/gal)
    pub fn reset_default_density(&mut self) {
        self.settings.default_density = Settings::default().default_density;
    }

    /// Restore the factory temperature (59°F)
    pub fn reset_default_temperature(&mut self) {
        self.settings.default_temperature = Settings::default().default_temperature;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.max_fuel_load, Pounds::new(2704.0));
        assert_eq!(s.default_density, PoundsPerGallon::new(6.7));
        assert_eq!(s.default_preset_load, Pounds::new(2000.0));
        assert_eq!(s.default_temperature, Fahrenheit::new(59.0));
        assert!(s.persist_settings);
    }

    #[test]
    fn test_partial_json_merges_with_defaults() {
        let s: Settings = serde_json::from_str(r#"{"maxFuelLoad": 3000}"#).unwrap();
        assert_eq!(s.max_fuel_load, Pounds::new(3000.0));
        assert_eq!(s.default_density, PoundsPerGallon::STANDARD);
        assert!(s.persist_settings);
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["maxFuelLoad"], 2704.0);
        assert_eq!(json["defaultPresetLoad"], 2000.0);
        assert_eq!(json["persistSettings"], true);
    }

    #[test]
    fn test_setters_replace_single_field() {
        let mut store = SettingsStore::default();
        store.set_max_fuel_load(Pounds::new(1500.0));
        store.set_persist_settings(false);
        assert_eq!(store.settings().max_fuel_load, Pounds::new(1500.0));
        assert!(!store.settings().persist_settings);
        assert_eq!(store.settings().default_density, PoundsPerGallon::STANDARD);
    }

    #[test]
    fn test_resets_restore_factory_values() {
        let mut store = SettingsStore::default();
        store.set_max_fuel_load(Pounds::new(1.0));
        store.set_default_density(PoundsPerGallon::new(7.5));
        store.set_default_temperature(Fahrenheit::new(100.0));
        store.reset_max_fuel_load();
        store.reset_default_density();
        store.reset_default_temperature();
        assert_eq!(*store.settings(), Settings::default());
    }

    #[test]
    fn test_bounds_clamp() {
        assert_eq!(SettingsBounds::clamp_max_fuel_load(-5.0), Pounds::ZERO);
        assert_eq!(
            SettingsBounds::clamp_default_density(9.0),
            PoundsPerGallon::new(8.0)
        );
        assert_eq!(
            SettingsBounds::clamp_default_temperature(-40.0),
            Fahrenheit::new(-22.0)
        );
        assert_eq!(
            SettingsBounds::clamp_default_preset_load(1800.0),
            Pounds::new(1800.0)
        );
    }
}
