//! Canonical fuel state and the mutators that keep it consistent
//!
//! Density is a derived quantity in steady state: it follows the configured
//! default density, corrected for the current temperature. A density entered
//! by hand is kept only until the next temperature, unit system or default
//! density change re-derives it.

use crate::core_types::{Pounds, PoundsPerGallon, UnitSystem};
use crate::physics::density::{adjust_density_for_temperature, convert_temperature};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw inputs every displayed quantity is derived from
///
/// Serialized with the same keys the persisted snapshot has always used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelState {
    /// Fuel on board (lbs)
    pub current_fuel: Pounds,
    /// Fuel wanted after fuelling (lbs)
    pub desired_fuel: Pounds,
    /// Fuel density (lbs/gal)
    pub density: PoundsPerGallon,
    /// Fuel temperature in the unit system's native scale (°F or °C)
    pub temperature: f64,
    /// Display unit system
    pub unit_system: UnitSystem,
}

impl FuelState {
    /// Empty tanks at the configured standard conditions, imperial units
    pub fn with_defaults(settings: &Settings) -> Self {
        Self {
            current_fuel: Pounds::ZERO,
            desired_fuel: Pounds::ZERO,
            density: settings.default_density,
            temperature: *settings.default_temperature,
            unit_system: UnitSystem::Imperial,
        }
    }
}

impl Default for FuelState {
    fn default() -> Self {
        Self::with_defaults(&Settings::default())
    }
}

/// Owns the [`FuelState`]
///
/// Mutators take the settings they are validated against; the store never
/// holds its own copy, so a settings change is seen by the next mutation.
#[derive(Debug, Clone, Default)]
pub struct FuelStateStore {
    state: FuelState,
}

impl FuelStateStore {
    /// Create a store at the default state for `settings`
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: FuelState::with_defaults(settings),
        }
    }

    /// Current state
    pub fn state(&self) -> &FuelState {
        &self.state
    }

    /// Set fuel on board, clamped to `max_fuel_load`
    ///
    /// No lower clamp: negative values are rejected by the input layer.
    pub fn set_current_fuel(&mut self, value: Pounds, settings: &Settings) {
        self.state.current_fuel = value.min(settings.max_fuel_load);
        debug!(current_fuel = *self.state.current_fuel, "Current fuel set");
    }

    /// Set the wanted fuel load, clamped to `max_fuel_load`
    pub fn set_desired_fuel(&mut self, value: Pounds, settings: &Settings) {
        self.state.desired_fuel = value.min(settings.max_fuel_load);
        debug!(desired_fuel = *self.state.desired_fuel, "Desired fuel set");
    }

    /// Store a density verbatim
    ///
    /// Not clamped and does not touch temperature. Overwritten by the next
    /// density re-derivation.
    pub fn set_density(&mut self, value: PoundsPerGallon) {
        self.state.density = value;
        debug!(density = *value, "Density set manually");
    }

    /// Store a temperature (native scale) and re-derive density from it
    pub fn set_temperature(&mut self, value: f64, settings: &Settings) {
        self.state.temperature = value;
        self.rederive_density(settings);
        debug!(
            temperature = value,
            density = *self.state.density,
            "Temperature set"
        );
    }

    /// Switch unit system, converting the stored temperature to the new scale
    ///
    /// The temperature is rounded to whole degrees and density re-derived
    /// from it. Fuel quantities stay in pounds. Returns `false` (and changes
    /// nothing) when `unit_system` is already active.
    pub fn set_unit_system(&mut self, unit_system: UnitSystem, settings: &Settings) -> bool {
        let previous = self.state.unit_system;
        if previous == unit_system {
            return false;
        }

        self.state.temperature =
            convert_temperature(self.state.temperature, previous, unit_system);
        self.state.unit_system = unit_system;
        self.rederive_density(settings);

        debug!(
            from = %previous,
            to = %unit_system,
            temperature = self.state.temperature,
            density = *self.state.density,
            "Unit system changed"
        );
        true
    }

    /// Recompute density from the default density and the current temperature
    pub fn rederive_density(&mut self, settings: &Settings) {
        self.state.density = adjust_density_for_temperature(
            settings.default_density,
            self.state.temperature,
            self.state.unit_system,
        );
    }

    /// Fill the desired load to the configured preset (clamped like any entry)
    pub fn apply_preset(&mut self, settings: &Settings) {
        self.set_desired_fuel(settings.default_preset_load, settings);
    }

    /// Return density and temperature to the configured standard conditions
    ///
    /// The temperature is the configured default as stored (°F) regardless
    /// of the active unit system, then density is re-derived from it.
    pub fn reset_conditions(&mut self, settings: &Settings) {
        self.set_density(settings.default_density);
        self.set_temperature(*settings.default_temperature, settings);
    }

    /// Install a loaded snapshot
    ///
    /// Density is re-derived only if the snapshot changes temperature or
    /// unit system; otherwise the stored density (manual or not) is kept.
    pub fn replace(&mut self, snapshot: FuelState, settings: &Settings) {
        let conditions_changed = snapshot.temperature != self.state.temperature
            || snapshot.unit_system != self.state.unit_system;
        self.state = snapshot;
        if conditions_changed {
            self.rederive_density(settings);
        }
    }
}
