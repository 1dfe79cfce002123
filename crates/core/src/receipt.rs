//! Fuel receipt projection
//!
//! Every displayed number is derived here from the raw [`FuelState`] and the
//! [`Settings`]. Nothing is cached: a receipt is recomputed on every read and
//! never persisted.

use crate::core_types::{Pounds, PoundsPerGallon, UnitSystem, Volume};
use crate::physics::conversion::{is_usable_density, pounds_to_volume};
use crate::physics::density::{expected_density, standard_temperature};
use crate::settings::Settings;
use crate::state::FuelState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of `max_fuel_load` above which a load is flagged as near the limit
pub const NEAR_MAX_FRACTION: f64 = 0.9;

/// Number of wing tanks the difference is split across
pub const TANKS_PER_SIDE_SPLIT: f64 = 2.0;

/// Whether fuel has to be pumped in or drained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FuelDirection {
    /// Desired load is above current load
    Add,
    /// Desired load is at or below current load (including no change)
    Remove,
}

impl fmt::Display for FuelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelDirection::Add => write!(f, "ADD"),
            FuelDirection::Remove => write!(f, "REMOVE"),
        }
    }
}

/// Everything the receipt shows, as numbers
///
/// Volumes are `None` when the stored density cannot produce a meaningful
/// volume (zero, negative or non-finite).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedReceipt {
    /// Unit system the volumes are expressed in
    pub unit_system: UnitSystem,
    /// Density used for every volume (lbs/gal)
    pub density: PoundsPerGallon,
    /// Temperature in the unit system's native scale
    pub temperature: f64,

    /// Fuel on board (lbs)
    pub current_fuel: Pounds,
    /// Fuel wanted (lbs)
    pub desired_fuel: Pounds,
    /// `desired - current`, signed (lbs)
    pub fuel_difference: Pounds,
    /// Add or remove
    pub direction: FuelDirection,

    /// Volume on board in the active unit
    pub current_volume: Option<Volume>,
    /// Wanted volume in the active unit
    pub desired_volume: Option<Volume>,
    /// |difference| in the active unit
    pub difference_volume: Option<Volume>,

    /// |difference| / 2 (lbs)
    pub per_side_fuel: Pounds,
    /// |difference volume| / 2
    pub per_side_volume: Option<Volume>,

    /// Stored density differs from the configured default
    pub density_changed: bool,
    /// Stored temperature differs from the configured default
    pub temperature_changed: bool,

    /// Default density corrected for the current temperature
    pub expected_density: PoundsPerGallon,
    /// Configured default temperature in the active scale
    pub standard_temperature: f64,
    /// Density or temperature is off the standard day, judged in the active scale.
    ///
    /// Unlike `temperature_changed`, 15°C counts as standard here.
    pub outside_standard_day: bool,

    /// Current load as a fraction of capacity (gauge fill)
    pub current_fill: f64,
    /// Desired load as a fraction of capacity (gauge fill)
    pub desired_fill: f64,
    /// Current load is above 90% of capacity
    pub current_near_max: bool,
    /// Desired load is above 90% of capacity
    pub desired_near_max: bool,
}

/// Pure projection from state + settings to a [`DerivedReceipt`]
#[derive(Debug, Clone, Copy)]
pub struct ReceiptProjector<'a> {
    state: &'a FuelState,
    settings: &'a Settings,
}

impl<'a> ReceiptProjector<'a> {
    /// Borrow the inputs to project from
    pub fn new(state: &'a FuelState, settings: &'a Settings) -> Self {
        Self { state, settings }
    }

    /// `desired - current` (signed)
    pub fn fuel_difference(&self) -> Pounds {
        self.state.desired_fuel - self.state.current_fuel
    }

    /// Add when the difference is strictly positive, remove otherwise
    pub fn direction(&self) -> FuelDirection {
        if self.fuel_difference() > 0.0 {
            FuelDirection::Add
        } else {
            FuelDirection::Remove
        }
    }

    /// Convert a mass to the active volume unit, or `None` for an unusable density
    pub fn volume_of(&self, pounds: Pounds) -> Option<Volume> {
        is_usable_density(self.state.density)
            .then(|| pounds_to_volume(pounds, self.state.density, self.state.unit_system))
    }

    /// Stored density is not the configured default
    ///
    /// Compares against the raw default, not the temperature-corrected one,
    /// so any temperature off 59°F raises the flag too.
    pub fn density_changed(&self) -> bool {
        self.state.density != self.settings.default_density
    }

    /// Stored temperature is not the configured default
    ///
    /// Compares the raw stored reading with the °F default.
    pub fn temperature_changed(&self) -> bool {
        self.state.temperature != *self.settings.default_temperature
    }

    /// Fraction of capacity a load fills; zero when capacity is zero
    pub fn fill_fraction(&self, pounds: Pounds) -> f64 {
        let max = *self.settings.max_fuel_load;
        if max > 0.0 {
            *pounds / max
        } else {
            0.0
        }
    }

    /// Load is within the top 10% of capacity
    pub fn is_near_max(&self, pounds: Pounds) -> bool {
        *pounds > *self.settings.max_fuel_load * NEAR_MAX_FRACTION
    }

    /// Compute every receipt value
    pub fn project(&self) -> DerivedReceipt {
        let state = self.state;
        let difference = self.fuel_difference();
        let magnitude = difference.abs();
        let difference_volume = self.volume_of(magnitude);

        let expected =
            expected_density(self.settings.default_density, state.temperature, state.unit_system);
        let standard_temp =
            standard_temperature(self.settings.default_temperature, state.unit_system);

        DerivedReceipt {
            unit_system: state.unit_system,
            density: state.density,
            temperature: state.temperature,
            current_fuel: state.current_fuel,
            desired_fuel: state.desired_fuel,
            fuel_difference: difference,
            direction: self.direction(),
            current_volume: self.volume_of(state.current_fuel),
            desired_volume: self.volume_of(state.desired_fuel),
            difference_volume,
            per_side_fuel: magnitude / TANKS_PER_SIDE_SPLIT,
            per_side_volume: difference_volume.map(Volume::half),
            density_changed: self.density_changed(),
            temperature_changed: self.temperature_changed(),
            expected_density: expected,
            standard_temperature: standard_temp,
            outside_standard_day: state.density != expected
                || state.temperature != standard_temp,
            current_fill: self.fill_fraction(state.current_fuel),
            desired_fill: self.fill_fraction(state.desired_fuel),
            current_near_max: self.is_near_max(state.current_fuel),
            desired_near_max: self.is_near_max(state.desired_fuel),
        }
    }
}
