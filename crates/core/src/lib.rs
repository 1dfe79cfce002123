//! Fuel Load Calculator Core Library
//!
//! Works out how much fuel to add to or drain from an aircraft to go from its
//! current load to a desired load, in pounds and in gallons or liters, with
//! fuel density corrected for temperature.
//!
//! ## Layout
//!
//! - [`physics`]: pure unit conversion and the linear density/temperature model
//! - [`state`]: the canonical fuel state and its consistency-preserving mutators
//! - [`settings`]: configured defaults and their bounds
//! - [`receipt`]: the read-only projection every displayed number comes from
//! - [`calculator`]: the coordinating context that routes mutations and persists
//! - [`persistence`]: the storage contract plus memory and JSON file backends
//! - [`input`]: the text-input boundary (parsing, ranges, warnings)
//!
//! ```
//! use fuel_calc_core::{FuelCalculator, FuelDirection, MemoryStorage, Pounds};
//!
//! let mut calc = FuelCalculator::new(MemoryStorage::new());
//! calc.set_current_fuel(Pounds::new(1200.0));
//! calc.set_desired_fuel(Pounds::new(2000.0));
//!
//! let receipt = calc.receipt();
//! assert_eq!(receipt.direction, FuelDirection::Add);
//! assert_eq!(receipt.per_side_fuel, Pounds::new(400.0));
//! ```

// Core types and utilities
pub mod core_types;

pub mod physics;

pub mod calculator;
pub mod input;
pub mod persistence;
pub mod receipt;
pub mod settings;
pub mod state;

// Re-export core types
pub use core_types::{
    Celsius, Fahrenheit, Gallons, Liters, Pounds, PoundsPerGallon, UnitSystem, Volume,
};

pub use calculator::FuelCalculator;
pub use input::{FieldBounds, InputError, ParsedInput};
pub use persistence::{FuelStorage, JsonFileStorage, MemoryStorage, PersistenceError};
pub use receipt::{DerivedReceipt, FuelDirection, ReceiptProjector};
pub use settings::{Settings, SettingsBounds, SettingsStore};
pub use state::{FuelState, FuelStateStore};
