//! Temperature-corrected fuel density
//!
//! Jet fuel contracts as it cools and expands as it warms. The model here is
//! the simple linear rule of thumb used on the ramp, not a certified
//! ASTM D1250 table:
//!
//! ρ(T) = ρ₅₉ − 0.0035 × (T − 59°F)
//!
//! where ρ₅₉ is the configured density at the 59°F standard day. The 59°F
//! reference is fixed and does not follow the configured default temperature.

use crate::core_types::{Celsius, Fahrenheit, PoundsPerGallon, UnitSystem};
use serde::{Deserialize, Serialize};

/// Standard-day reference temperature for the density correction
pub const REFERENCE_TEMPERATURE: Fahrenheit = Fahrenheit::STANDARD_DAY;

/// Density change per °F of warming (lbs/gal per °F)
pub const DENSITY_PER_DEGREE_F: f64 = -0.0035;

/// Round to a fixed number of decimal places
#[inline]
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Round to the nearest whole number, halves toward +∞ (`2.5 → 3`, `-2.5 → -2`)
#[inline]
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Convert °F to °C: `(f - 32) * 5/9`
#[inline]
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    *Fahrenheit::new(fahrenheit).to_celsius()
}

/// Convert °C to °F: `c * 9/5 + 32`
#[inline]
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    *Celsius::new(celsius).to_fahrenheit()
}

/// Interpret a reading in the unit system's native scale as Fahrenheit
#[inline]
#[must_use]
pub fn to_fahrenheit(temperature: f64, unit_system: UnitSystem) -> Fahrenheit {
    match unit_system {
        UnitSystem::Imperial => Fahrenheit::new(temperature),
        UnitSystem::Metric => Celsius::new(temperature).to_fahrenheit(),
    }
}

/// Adjust a standard-day density for the current temperature
///
/// # Arguments
/// * `base_density` - Density at the 59°F reference (lbs/gal)
/// * `temperature` - Current temperature in the unit system's native scale
/// * `unit_system` - Selects °C (metric) or °F (imperial) for `temperature`
///
/// # Returns
/// Adjusted density rounded to 3 decimal places. Never clamped: a physically
/// implausible temperature yields a physically implausible density.
#[must_use]
pub fn adjust_density_for_temperature(
    base_density: PoundsPerGallon,
    temperature: f64,
    unit_system: UnitSystem,
) -> PoundsPerGallon {
    let temp_f = to_fahrenheit(temperature, unit_system);
    let temp_diff = *temp_f - *REFERENCE_TEMPERATURE;
    let adjustment = temp_diff * DENSITY_PER_DEGREE_F;

    PoundsPerGallon::new(round_to(*base_density + adjustment, 3))
}

/// Convert a stored reading from one unit system's scale to another's
///
/// The result is rounded to whole degrees, matching what a unit toggle shows.
/// Converting to the same system returns the reading unchanged.
#[must_use]
pub fn convert_temperature(temperature: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Imperial, UnitSystem::Metric) => {
            round_half_up(fahrenheit_to_celsius(temperature))
        }
        (UnitSystem::Metric, UnitSystem::Imperial) => {
            round_half_up(celsius_to_fahrenheit(temperature))
        }
        _ => temperature,
    }
}

/// The configured default temperature expressed in the active scale
///
/// Metric values are rounded to whole degrees (59°F → 15°C).
#[must_use]
pub fn standard_temperature(default_temperature: Fahrenheit, unit_system: UnitSystem) -> f64 {
    convert_temperature(*default_temperature, UnitSystem::Imperial, unit_system)
}

/// Density the default would have at the current temperature
///
/// A stored density that differs from this value was entered by hand.
#[inline]
#[must_use]
pub fn expected_density(
    default_density: PoundsPerGallon,
    temperature: f64,
    unit_system: UnitSystem,
) -> PoundsPerGallon {
    adjust_density_for_temperature(default_density, temperature, unit_system)
}

/// Accepted temperature range for manual entry, per unit system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureLimits {
    /// Lowest accepted reading
    pub min: f64,
    /// Highest accepted reading
    pub max: f64,
}

impl TemperatureLimits {
    /// −76..=140 °F
    pub const IMPERIAL: TemperatureLimits = TemperatureLimits {
        min: -76.0,
        max: 140.0,
    };

    /// −60..=60 °C
    pub const METRIC: TemperatureLimits = TemperatureLimits {
        min: -60.0,
        max: 60.0,
    };

    /// Limits for the given unit system's native scale
    #[must_use]
    pub fn for_unit_system(unit_system: UnitSystem) -> Self {
        match unit_system {
            UnitSystem::Imperial => Self::IMPERIAL,
            UnitSystem::Metric => Self::METRIC,
        }
    }

    /// Whether a reading lies inside the limits (inclusive)
    #[must_use]
    pub fn contains(&self, temperature: f64) -> bool {
        (self.min..=self.max).contains(&temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_adjustment_at_standard_day() {
        let d = adjust_density_for_temperature(
            PoundsPerGallon::new(6.7),
            59.0,
            UnitSystem::Imperial,
        );
        assert_eq!(d, PoundsPerGallon::new(6.7));
    }

    #[test]
    fn test_warmer_fuel_is_lighter() {
        let d = adjust_density_for_temperature(
            PoundsPerGallon::new(6.7),
            99.0,
            UnitSystem::Imperial,
        );
        assert_eq!(d, PoundsPerGallon::new(6.56));
    }

    #[test]
    fn test_colder_fuel_is_heavier() {
        // 19°F is 40° below standard: +0.14 lbs/gal
        let d = adjust_density_for_temperature(
            PoundsPerGallon::new(6.7),
            19.0,
            UnitSystem::Imperial,
        );
        assert_eq!(d, PoundsPerGallon::new(6.84));
    }

    #[test]
    fn test_metric_input_is_normalized() {
        // 15°C is exactly 59°F
        let d = adjust_density_for_temperature(
            PoundsPerGallon::new(6.7),
            15.0,
            UnitSystem::Metric,
        );
        assert_eq!(d, PoundsPerGallon::new(6.7));

        // 40°C = 104°F: 45° above standard, -0.1575 → 6.5425 → 6.543 or 6.542
        let d = adjust_density_for_temperature(
            PoundsPerGallon::new(6.7),
            40.0,
            UnitSystem::Metric,
        );
        assert_relative_eq!(*d, 6.5425, epsilon = 0.0006);
    }

    #[test]
    fn test_result_rounded_to_three_decimals() {
        let d = adjust_density_for_temperature(
            PoundsPerGallon::new(6.7),
            60.0,
            UnitSystem::Imperial,
        );
        // 6.7 - 0.0035 = 6.6965 → 6.697 (or 6.696 depending on binary repr)
        assert!((*d * 1000.0 - (*d * 1000.0).round()).abs() < 1e-9);
    }

    #[test]
    fn test_no_clamping_of_extreme_temperatures() {
        let d = adjust_density_for_temperature(
            PoundsPerGallon::new(6.7),
            1059.0,
            UnitSystem::Imperial,
        );
        assert_relative_eq!(*d, 3.2, epsilon = 1e-9);
    }

    #[test]
    fn test_temperature_round_trip() {
        for x in [-60.0, -40.0, 0.0, 15.0, 37.5, 100.0] {
            assert_relative_eq!(
                fahrenheit_to_celsius(celsius_to_fahrenheit(x)),
                x,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_convert_temperature_rounds_whole_degrees() {
        assert_eq!(
            convert_temperature(59.0, UnitSystem::Imperial, UnitSystem::Metric),
            15.0
        );
        assert_eq!(
            convert_temperature(15.0, UnitSystem::Metric, UnitSystem::Imperial),
            59.0
        );
        // 70°F = 21.11°C
        assert_eq!(
            convert_temperature(70.0, UnitSystem::Imperial, UnitSystem::Metric),
            21.0
        );
        assert_eq!(
            convert_temperature(42.5, UnitSystem::Metric, UnitSystem::Metric),
            42.5
        );
    }

    #[test]
    fn test_round_half_up_matches_toggle_display() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn test_standard_temperature_per_unit_system() {
        assert_eq!(
            standard_temperature(Fahrenheit::STANDARD_DAY, UnitSystem::Imperial),
            59.0
        );
        assert_eq!(
            standard_temperature(Fahrenheit::STANDARD_DAY, UnitSystem::Metric),
            15.0
        );
    }

    #[test]
    fn test_temperature_limits() {
        let metric = TemperatureLimits::for_unit_system(UnitSystem::Metric);
        assert!(metric.contains(60.0));
        assert!(!metric.contains(61.0));
        let imperial = TemperatureLimits::for_unit_system(UnitSystem::Imperial);
        assert!(imperial.contains(-76.0));
        assert!(!imperial.contains(141.0));
    }
}
