//! Text input boundary
//!
//! The core works on already-parsed numbers. This module is the layer in
//! front of it: it turns what the user typed into a number, checks it
//! against the field's declared range and reports an advisory when a fuel
//! load gets close to capacity.

use crate::core_types::UnitSystem;
use crate::physics::density::TemperatureLimits;
use crate::settings::{Settings, SettingsBounds};
use thiserror::Error;

/// Fraction of the field maximum above which a value is "approaching maximum"
pub const WARNING_FRACTION: f64 = 0.9;

/// Rejected input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Text is not a finite number
    #[error("Invalid number: {input:?}")]
    InvalidNumber {
        /// What was typed
        input: String,
    },
    /// Number lies outside the field's range
    #[error("Value {value} is out of range ({min} to {max})")]
    OutOfRange {
        /// Parsed value
        value: f64,
        /// Lowest accepted value
        min: f64,
        /// Highest accepted value
        max: f64,
    },
}

/// Declared range of an input field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    /// Lowest accepted value
    pub min: f64,
    /// Highest accepted value
    pub max: f64,
    /// Empty text reads as zero instead of being rejected
    pub allow_empty: bool,
    /// Values above this are accepted with a warning
    pub warning_threshold: Option<f64>,
}

impl FieldBounds {
    /// Current or desired fuel: 0..=capacity, warns above 90% of capacity
    pub fn fuel(settings: &Settings) -> Self {
        let max = *settings.max_fuel_load;
        Self {
            min: 0.0,
            max,
            allow_empty: true,
            warning_threshold: Some(max * WARNING_FRACTION),
        }
    }

    /// Manually entered density: 5..=8 lbs/gal
    pub fn density() -> Self {
        Self {
            min: SettingsBounds::MIN_DENSITY,
            max: SettingsBounds::MAX_DENSITY,
            allow_empty: false,
            warning_threshold: None,
        }
    }

    /// Temperature in the unit system's native scale
    pub fn temperature(unit_system: UnitSystem) -> Self {
        let limits = TemperatureLimits::for_unit_system(unit_system);
        Self {
            min: limits.min,
            max: limits.max,
            allow_empty: false,
            warning_threshold: None,
        }
    }
}

/// A number that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedInput {
    /// The accepted value
    pub value: f64,
    /// Value is above the field's warning threshold
    pub approaching_max: bool,
}

/// Parse typed text into a finite number
///
/// Surrounding whitespace is ignored. Empty text is zero when `allow_empty`.
///
/// # Errors
/// Returns [`InputError::InvalidNumber`] for empty text (when not allowed),
/// unparseable text, NaN and infinities
pub fn parse_number(text: &str, allow_empty: bool) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() && allow_empty {
        return Ok(0.0);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::InvalidNumber {
            input: text.to_string(),
        }),
    }
}

/// Check a parsed value against a field's range (inclusive)
///
/// # Errors
/// Returns [`InputError::OutOfRange`] when `value` is below `min` or above `max`
pub fn check_bounds(value: f64, bounds: &FieldBounds) -> Result<f64, InputError> {
    if value < bounds.min || value > bounds.max {
        return Err(InputError::OutOfRange {
            value,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(value)
}

/// Whether a value is above the field's warning threshold
pub fn is_approaching_max(value: f64, bounds: &FieldBounds) -> bool {
    bounds.warning_threshold.is_some_and(|t| value > t)
}

/// Parse and validate typed text for a field
///
/// A literal zero (`"0"` or `"-0"`) is accepted without a range check, the
/// way a cleared field resets to zero. Zero density therefore gets through
/// here and is caught by the receipt's volume guard instead.
///
/// # Errors
/// Returns [`InputError::InvalidNumber`] or [`InputError::OutOfRange`]
pub fn parse_field(text: &str, bounds: &FieldBounds) -> Result<ParsedInput, InputError> {
    let trimmed = text.trim();
    if trimmed == "0" || trimmed == "-0" {
        return Ok(ParsedInput {
            value: 0.0,
            approaching_max: false,
        });
    }

    let value = parse_number(text, bounds.allow_empty)?;
    let value = check_bounds(value, bounds)?;

    Ok(ParsedInput {
        value,
        approaching_max: is_approaching_max(value, bounds),
    })
}
