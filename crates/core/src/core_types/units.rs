//! Semantic unit types for type-safe fuel quantity handling
//!
//! This module provides newtype wrappers for the quantities a fuel receipt is
//! built from, so that pounds are never divided by liters or a Celsius reading
//! fed into a Fahrenheit formula by accident.
//!
//! # Design Philosophy
//! - All quantities use f64 (density is rounded to 3 decimals and compared exactly)
//! - Implements the arithmetic the fuel model actually needs (lbs / density = gal, ...)
//! - Provides explicit conversion methods between related types
//! - Serde support: every type serializes as a bare number
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//! - Constructors never panic; range policy lives in the state store and input layer
//!
//! # Usage
//! ```
//! use fuel_calc_core::core_types::units::{Gallons, Pounds, PoundsPerGallon};
//!
//! let fuel = Pounds::new(670.0);
//! let gallons: Gallons = fuel / PoundsPerGallon::new(6.7);
//! assert!((*gallons - 100.0).abs() < 1e-9);
//!
//! // Use standard min/max from Ord trait
//! let limit = Pounds::new(2704.0);
//! assert_eq!(Pounds::new(3000.0).min(limit), limit);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Div, Mul, Neg, Sub};

/// Liters in one US gallon
pub const LITERS_PER_GALLON: f64 = 3.78541;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// MASS
// ============================================================================

/// Fuel mass in pounds
///
/// Signed: the same type carries loads and the difference between two loads.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Pounds(f64);

impl Eq for Pounds {}

impl PartialOrd for Pounds {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pounds {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Pounds {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Pounds {
    /// Zero pounds
    pub const ZERO: Pounds = Pounds(0.0);

    /// Create a new mass in pounds
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Pounds(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Magnitude of the mass (drops the sign of a difference)
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        Pounds(self.0.abs())
    }
}

impl From<f64> for Pounds {
    fn from(v: f64) -> Self {
        Pounds(v)
    }
}

impl From<Pounds> for f64 {
    fn from(p: Pounds) -> f64 {
        p.0
    }
}

impl fmt::Display for Pounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} lbs", self.0)
    }
}

impl Add for Pounds {
    type Output = Pounds;
    fn add(self, rhs: Pounds) -> Pounds {
        Pounds(self.0 + rhs.0)
    }
}

impl Sub for Pounds {
    type Output = Pounds;
    fn sub(self, rhs: Pounds) -> Pounds {
        Pounds(self.0 - rhs.0)
    }
}

impl Neg for Pounds {
    type Output = Pounds;
    fn neg(self) -> Pounds {
        Pounds(-self.0)
    }
}

impl Mul<f64> for Pounds {
    type Output = Pounds;
    fn mul(self, rhs: f64) -> Pounds {
        Pounds(self.0 * rhs)
    }
}

impl Div<f64> for Pounds {
    type Output = Pounds;
    fn div(self, rhs: f64) -> Pounds {
        Pounds(self.0 / rhs)
    }
}

// Pounds / (lbs/gal) = gallons. Zero density is not guarded here.
impl Div<PoundsPerGallon> for Pounds {
    type Output = Gallons;
    fn div(self, rhs: PoundsPerGallon) -> Gallons {
        Gallons(self.0 / rhs.0)
    }
}

impl PartialEq<f64> for Pounds {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for Pounds {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

// ============================================================================
// VOLUME
// ============================================================================

/// Fuel volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Gallons(f64);

impl Eq for Gallons {}

impl PartialOrd for Gallons {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Gallons {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Gallons {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Gallons {
    /// Create a new volume in gallons
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Gallons(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to liters
    #[inline]
    #[must_use]
    pub fn to_liters(self) -> Liters {
        Liters(self.0 * LITERS_PER_GALLON)
    }
}

impl From<f64> for Gallons {
    fn from(v: f64) -> Self {
        Gallons(v)
    }
}

impl From<Gallons> for Liters {
    fn from(g: Gallons) -> Liters {
        g.to_liters()
    }
}

impl fmt::Display for Gallons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} GAL", self.0)
    }
}

// gallons * (lbs/gal) = pounds
impl Mul<PoundsPerGallon> for Gallons {
    type Output = Pounds;
    fn mul(self, rhs: PoundsPerGallon) -> Pounds {
        Pounds(self.0 * rhs.0)
    }
}

impl Div<f64> for Gallons {
    type Output = Gallons;
    fn div(self, rhs: f64) -> Gallons {
        Gallons(self.0 / rhs)
    }
}

/// Fuel volume in liters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Liters(f64);

impl Eq for Liters {}

impl PartialOrd for Liters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Liters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Liters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Liters {
    /// Create a new volume in liters
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Liters(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to US gallons
    #[inline]
    #[must_use]
    pub fn to_gallons(self) -> Gallons {
        Gallons(self.0 / LITERS_PER_GALLON)
    }
}

impl From<f64> for Liters {
    fn from(v: f64) -> Self {
        Liters(v)
    }
}

impl From<Liters> for Gallons {
    fn from(l: Liters) -> Gallons {
        l.to_gallons()
    }
}

impl fmt::Display for Liters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} L", self.0)
    }
}

impl Div<f64> for Liters {
    type Output = Liters;
    fn div(self, rhs: f64) -> Liters {
        Liters(self.0 / rhs)
    }
}

/// A volume expressed in whichever unit the active unit system displays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Volume {
    /// Imperial display
    Gallons(Gallons),
    /// Metric display
    Liters(Liters),
}

impl Volume {
    /// Raw number in the carried unit
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Volume::Gallons(g) => *g,
            Volume::Liters(l) => *l,
        }
    }

    /// Short unit label as printed on a receipt
    #[must_use]
    pub fn unit_label(self) -> &'static str {
        match self {
            Volume::Gallons(_) => "GAL",
            Volume::Liters(_) => "L",
        }
    }

    /// Half of this volume, in the same unit (one wing tank)
    #[must_use]
    pub fn half(self) -> Self {
        match self {
            Volume::Gallons(g) => Volume::Gallons(g / 2.0),
            Volume::Liters(l) => Volume::Liters(l / 2.0),
        }
    }

    /// The volume in gallons regardless of the carried unit
    #[must_use]
    pub fn to_gallons(self) -> Gallons {
        match self {
            Volume::Gallons(g) => g,
            Volume::Liters(l) => l.to_gallons(),
        }
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volume::Gallons(g) => fmt::Display::fmt(g, f),
            Volume::Liters(l) => fmt::Display::fmt(l, f),
        }
    }
}

// ============================================================================
// DENSITY
// ============================================================================

/// Fuel density in pounds per US gallon
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PoundsPerGallon(f64);

impl Eq for PoundsPerGallon {}

impl PartialOrd for PoundsPerGallon {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PoundsPerGallon {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for PoundsPerGallon {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl PoundsPerGallon {
    /// Typical Jet-A density at 59°F
    pub const STANDARD: PoundsPerGallon = PoundsPerGallon(6.7);

    /// Create a new density. Any value is accepted, including zero.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        PoundsPerGallon(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for PoundsPerGallon {
    fn from(v: f64) -> Self {
        PoundsPerGallon(v)
    }
}

impl From<PoundsPerGallon> for f64 {
    fn from(d: PoundsPerGallon) -> f64 {
        d.0
    }
}

impl fmt::Display for PoundsPerGallon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} lbs/gal", self.0)
    }
}

impl Add<f64> for PoundsPerGallon {
    type Output = PoundsPerGallon;
    fn add(self, rhs: f64) -> PoundsPerGallon {
        PoundsPerGallon(self.0 + rhs)
    }
}

impl PartialEq<f64> for PoundsPerGallon {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fahrenheit(f64);

impl Eq for Fahrenheit {}

impl PartialOrd for Fahrenheit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fahrenheit {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Fahrenheit {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Fahrenheit {
    /// ISA standard day at sea level
    pub const STANDARD_DAY: Fahrenheit = Fahrenheit(59.0);

    /// Create a new Fahrenheit temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Fahrenheit(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to Celsius: `(f - 32) * 5/9`
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius((self.0 - 32.0) * (5.0 / 9.0))
    }
}

impl From<f64> for Fahrenheit {
    fn from(v: f64) -> Self {
        Fahrenheit(v)
    }
}

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Fahrenheit {
        c.to_fahrenheit()
    }
}

impl From<Fahrenheit> for f64 {
    fn from(t: Fahrenheit) -> f64 {
        t.0
    }
}

impl fmt::Display for Fahrenheit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°F", self.0)
    }
}

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// ISA standard day at sea level
    pub const STANDARD_DAY: Celsius = Celsius(15.0);

    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to Fahrenheit: `c * 9/5 + 32`
    #[inline]
    #[must_use]
    pub fn to_fahrenheit(self) -> Fahrenheit {
        Fahrenheit(self.0 * (9.0 / 5.0) + 32.0)
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius(v)
    }
}

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Celsius {
        f.to_celsius()
    }
}

impl From<Celsius> for f64 {
    fn from(t: Celsius) -> f64 {
        t.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds_over_density_is_gallons() {
        let g = Pounds(800.0) / PoundsPerGallon(6.7);
        assert!((g.0 - 119.402_985).abs() < 1e-5);
    }

    #[test]
    fn test_gallons_times_density_is_pounds() {
        let p = Gallons(100.0) * PoundsPerGallon(6.7);
        assert!((p.0 - 670.0).abs() < 1e-9);
    }

    #[test]
    fn test_gallons_to_liters() {
        let l = Gallons(10.0).to_liters();
        assert!((l.0 - 37.8541).abs() < 1e-9);
    }

    #[test]
    fn test_celsius_fahrenheit_standard_day() {
        assert_eq!(Celsius::STANDARD_DAY.to_fahrenheit(), Fahrenheit::STANDARD_DAY);
        assert!((Fahrenheit::STANDARD_DAY.to_celsius().0 - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_pounds_ordering_clamps_nan_to_limit() {
        let limit = Pounds(2704.0);
        assert_eq!(Pounds(f64::NAN).min(limit), limit);
        assert_eq!(Pounds(100.0).min(limit), Pounds(100.0));
    }

    #[test]
    fn test_volume_half_keeps_unit() {
        let v = Volume::Liters(Liters(50.0)).half();
        assert_eq!(v, Volume::Liters(Liters(25.0)));
        assert_eq!(v.unit_label(), "L");
    }

    #[test]
    fn test_display_one_decimal() {
        assert_eq!(Pounds(400.0).to_string(), "400.0 lbs");
        assert_eq!(Gallons(59.701_49).to_string(), "59.7 GAL");
        assert_eq!(Celsius(15.0).to_string(), "15.0°C");
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Pounds(1200.0)).unwrap();
        assert_eq!(json, "1200.0");
        let back: PoundsPerGallon = serde_json::from_str("6.7").unwrap();
        assert_eq!(back, PoundsPerGallon(6.7));
    }
}
