//! The coordinating context
//!
//! [`FuelCalculator`] owns the settings, the fuel state and a storage
//! backend. Every mutation goes through it so that density re-derivation and
//! persistence happen in one place, synchronously, in this order:
//!
//! 1. update the in-memory state
//! 2. re-derive density if its inputs changed
//! 3. persist (best-effort; a failure is logged and the update stands)

use crate::core_types::{Fahrenheit, Pounds, PoundsPerGallon, UnitSystem};
use crate::persistence::FuelStorage;
use crate::receipt::{DerivedReceipt, ReceiptProjector};
use crate::settings::{Settings, SettingsStore};
use crate::state::{FuelState, FuelStateStore};
use tracing::{debug, info, warn};

/// Fuel state, settings and storage behind one mutation API
#[derive(Debug)]
pub struct FuelCalculator<S: FuelStorage> {
    settings: SettingsStore,
    fuel: FuelStateStore,
    storage: S,
}

impl<S: FuelStorage> FuelCalculator<S> {
    /// Start a session from whatever `storage` holds
    ///
    /// Settings load merged with defaults (defaults on failure). The fuel
    /// state starts at the defaults and, if persistence is enabled, is
    /// replaced by the stored snapshot when one exists and can be read.
    pub fn new(storage: S) -> Self {
        let settings = match storage.load_settings() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings, using defaults: {e}");
                Settings::default()
            }
        };

        let mut fuel = FuelStateStore::new(&settings);
        if settings.persist_settings {
            match storage.load_fuel_state() {
                Ok(Some(snapshot)) => {
                    fuel.replace(snapshot, &settings);
                    info!(
                        current_fuel = *snapshot.current_fuel,
                        desired_fuel = *snapshot.desired_fuel,
                        unit_system = %snapshot.unit_system,
                        "Restored saved fuel state"
                    );
                }
                Ok(None) => debug!("No saved fuel state"),
                Err(e) => warn!("Failed to load fuel state, using defaults: {e}"),
            }
        }

        Self {
            settings: SettingsStore::new(settings),
            fuel,
            storage,
        }
    }

    /// Current fuel state
    pub fn fuel_state(&self) -> &FuelState {
        self.fuel.state()
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    /// Storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Project the receipt from the current state (recomputed on every call)
    pub fn receipt(&self) -> DerivedReceipt {
        ReceiptProjector::new(self.fuel.state(), self.settings.settings()).project()
    }

    /// Give back the storage backend
    pub fn into_storage(self) -> S {
        self.storage
    }

    // ------------------------------------------------------------------
    // Fuel state mutators
    // ------------------------------------------------------------------

    /// Set fuel on board (clamped to capacity)
    pub fn set_current_fuel(&mut self, value: Pounds) {
        self.fuel.set_current_fuel(value, self.settings.settings());
        self.persist_fuel_state();
    }

    /// Set the wanted load (clamped to capacity)
    pub fn set_desired_fuel(&mut self, value: Pounds) {
        self.fuel.set_desired_fuel(value, self.settings.settings());
        self.persist_fuel_state();
    }

    /// Override density by hand (kept until the next re-derivation)
    pub fn set_density(&mut self, value: PoundsPerGallon) {
        self.fuel.set_density(value);
        self.persist_fuel_state();
    }

    /// Set temperature in the active scale; density follows
    pub fn set_temperature(&mut self, value: f64) {
        self.fuel.set_temperature(value, self.settings.settings());
        self.persist_fuel_state();
    }

    /// Switch display units; temperature is converted and density re-derived
    pub fn set_unit_system(&mut self, unit_system: UnitSystem) {
        if self.fuel.set_unit_system(unit_system, self.settings.settings()) {
            self.persist_fuel_state();
        }
    }

    /// Fill the desired load to the configured preset
    pub fn apply_preset(&mut self) {
        self.fuel.apply_preset(self.settings.settings());
        self.persist_fuel_state();
    }

    /// Return density and temperature to the configured standard
    pub fn reset_conditions(&mut self) {
        self.fuel.reset_conditions(self.settings.settings());
        self.persist_fuel_state();
    }

    // ------------------------------------------------------------------
    // Settings mutators
    // ------------------------------------------------------------------

    /// Replace every setting at once
    pub fn update_settings(&mut self, settings: Settings) {
        let previous = *self.settings.settings();
        self.settings.replace(settings);
        self.settings_changed(&previous);
    }

    /// Set capacity; stored loads are not rewritten until their next mutation
    pub fn set_max_fuel_load(&mut self, value: Pounds) {
        let previous = *self.settings.settings();
        self.settings.set_max_fuel_load(value);
        self.settings_changed(&previous);
    }

    /// Set the standard-day density; the fuel state's density is re-derived
    pub fn set_default_density(&mut self, value: PoundsPerGallon) {
        let previous = *self.settings.settings();
        self.settings.set_default_density(value);
        self.settings_changed(&previous);
    }

    /// Set the preset load
    pub fn set_default_preset_load(&mut self, value: Pounds) {
        let previous = *self.settings.settings();
        self.settings.set_default_preset_load(value);
        self.settings_changed(&previous);
    }

    /// Set the standard temperature (°F)
    pub fn set_default_temperature(&mut self, value: Fahrenheit) {
        let previous = *self.settings.settings();
        self.settings.set_default_temperature(value);
        self.settings_changed(&previous);
    }

    /// Turn fuel state persistence on or off; off clears the stored snapshot
    pub fn set_persist_settings(&mut self, value: bool) {
        let previous = *self.settings.settings();
        self.settings.set_persist_settings(value);
        self.settings_changed(&previous);
    }

    /// Restore the factory capacity
    pub fn reset_max_fuel_load(&mut self) {
        let previous = *self.settings.settings();
        self.settings.reset_max_fuel_load();
        self.settings_changed(&previous);
    }

    /// Restore the factory density
    pub fn reset_default_density(&mut self) {
        let previous = *self.settings.settings();
        self.settings.reset_default_density();
        self.settings_changed(&previous);
    }

    /// Restore the factory temperature
    pub fn reset_default_temperature(&mut self) {
        let previous = *self.settings.settings();
        self.settings.reset_default_temperature();
        self.settings_changed(&previous);
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    fn settings_changed(&mut self, previous: &Settings) {
        let settings = *self.settings.settings();
        debug!(?settings, "Settings updated");

        if let Err(e) = self.storage.save_settings(&settings) {
            warn!("Failed to save settings: {e}");
        }

        if !settings.persist_settings {
            if let Err(e) = self.storage.clear_fuel_state() {
                warn!("Failed to clear fuel state: {e}");
            }
        }

        let density_changed = settings.default_density != previous.default_density;
        if density_changed {
            self.fuel.rederive_density(&settings);
        }

        // Re-enabling persistence snapshots the live session right away
        let persistence_enabled = settings.persist_settings && !previous.persist_settings;
        if density_changed || persistence_enabled {
            self.persist_fuel_state();
        }
    }

    fn persist_fuel_state(&mut self) {
        if !self.settings.settings().persist_settings {
            return;
        }
        if let Err(e) = self.storage.save_fuel_state(self.fuel.state()) {
            warn!("Failed to save fuel state: {e}");
        }
    }
}
