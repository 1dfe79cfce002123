//! Mass / volume conversion for aviation fuel
//!
//! Pounds and gallons are related through density (lbs/gal); gallons and
//! liters through the fixed US gallon definition. Every other combination
//! composes from those two.
//!
//! None of these functions guard against a zero density: `pounds / 0.0` is
//! returned as-is (infinite or NaN). Callers that display volumes check
//! [`is_usable_density`] first.

use crate::core_types::{Gallons, Liters, Pounds, PoundsPerGallon, UnitSystem, Volume};

/// Convert a fuel mass to gallons
///
/// # Arguments
/// * `pounds` - Fuel mass
/// * `density` - Fuel density (lbs/gal)
///
/// # Returns
/// `pounds / density`; non-finite when density is zero
#[inline]
#[must_use]
pub fn pounds_to_gallons(pounds: Pounds, density: PoundsPerGallon) -> Gallons {
    pounds / density
}

/// Convert a fuel volume in gallons to its mass
#[inline]
#[must_use]
pub fn gallons_to_pounds(gallons: Gallons, density: PoundsPerGallon) -> Pounds {
    gallons * density
}

/// Convert US gallons to liters (× 3.78541)
#[inline]
#[must_use]
pub fn gallons_to_liters(gallons: Gallons) -> Liters {
    gallons.to_liters()
}

/// Convert liters to US gallons (÷ 3.78541)
#[inline]
#[must_use]
pub fn liters_to_gallons(liters: Liters) -> Gallons {
    liters.to_gallons()
}

/// Convert a fuel mass straight to liters
#[inline]
#[must_use]
pub fn pounds_to_liters(pounds: Pounds, density: PoundsPerGallon) -> Liters {
    gallons_to_liters(pounds_to_gallons(pounds, density))
}

/// Convert a fuel volume in liters to its mass
#[inline]
#[must_use]
pub fn liters_to_pounds(liters: Liters, density: PoundsPerGallon) -> Pounds {
    gallons_to_pounds(liters_to_gallons(liters), density)
}

/// Convert a fuel mass to the volume unit the given unit system displays
///
/// Imperial yields gallons, metric yields liters (via gallons).
#[must_use]
pub fn pounds_to_volume(
    pounds: Pounds,
    density: PoundsPerGallon,
    unit_system: UnitSystem,
) -> Volume {
    let gallons = pounds_to_gallons(pounds, density);
    match unit_system {
        UnitSystem::Imperial => Volume::Gallons(gallons),
        UnitSystem::Metric => Volume::Liters(gallons_to_liters(gallons)),
    }
}

/// Whether a density can be divided by to produce a displayable volume
#[inline]
#[must_use]
pub fn is_usable_density(density: PoundsPerGallon) -> bool {
    density.is_finite() && *density > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pounds_to_gallons_default_density() {
        let gallons = pounds_to_gallons(Pounds::new(67.0), PoundsPerGallon::STANDARD);
        assert_relative_eq!(*gallons, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pounds_to_gallons_specified_density() {
        let gallons = pounds_to_gallons(Pounds::new(67.0), PoundsPerGallon::new(7.0));
        assert_relative_eq!(*gallons, 67.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mass_round_trip() {
        let density = PoundsPerGallon::new(6.56);
        for pounds in [0.0, 1.0, 400.0, 1234.5, 2704.0] {
            let back = gallons_to_pounds(pounds_to_gallons(Pounds::new(pounds), density), density);
            assert_relative_eq!(*back, pounds, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_volume_round_trip() {
        for gallons in [0.0, 1.0, 59.7, 402.0] {
            let back = liters_to_gallons(gallons_to_liters(Gallons::new(gallons)));
            assert_relative_eq!(*back, gallons, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_liters_to_pounds_composes() {
        let density = PoundsPerGallon::new(6.7);
        let liters = pounds_to_liters(Pounds::new(670.0), density);
        assert_relative_eq!(*liters, 378.541, epsilon = 1e-6);
        assert_relative_eq!(*liters_to_pounds(liters, density), 670.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pounds_to_volume_selects_unit() {
        let density = PoundsPerGallon::new(6.7);
        let imperial = pounds_to_volume(Pounds::new(670.0), density, UnitSystem::Imperial);
        let metric = pounds_to_volume(Pounds::new(670.0), density, UnitSystem::Metric);
        assert_eq!(imperial.unit_label(), "GAL");
        assert_relative_eq!(imperial.value(), 100.0, epsilon = 1e-9);
        assert_eq!(metric.unit_label(), "L");
        assert_relative_eq!(metric.value(), 378.541, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_density_is_not_sanitized() {
        let gallons = pounds_to_gallons(Pounds::new(100.0), PoundsPerGallon::new(0.0));
        assert!(gallons.is_infinite());
        let gallons = pounds_to_gallons(Pounds::ZERO, PoundsPerGallon::new(0.0));
        assert!(gallons.is_nan());
        assert!(!is_usable_density(PoundsPerGallon::new(0.0)));
        assert!(!is_usable_density(PoundsPerGallon::new(f64::NAN)));
        assert!(is_usable_density(PoundsPerGallon::STANDARD));
    }
}
