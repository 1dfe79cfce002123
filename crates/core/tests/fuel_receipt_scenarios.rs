//! End-to-end receipt scenarios driven through `FuelCalculator`
//!
//! These follow the sequence a pilot goes through on the ramp: enter what is
//! on board, enter what is wanted, adjust for the fuel temperature, read the
//! receipt in either unit system.

use approx::assert_relative_eq;
use fuel_calc_core::physics::{adjust_density_for_temperature, pounds_to_gallons};
use fuel_calc_core::{
    FuelCalculator, FuelDirection, MemoryStorage, Pounds, PoundsPerGallon, UnitSystem,
};

fn calculator() -> FuelCalculator<MemoryStorage> {
    FuelCalculator::new(MemoryStorage::new())
}

#[test]
fn test_add_fuel_receipt() {
    let mut calc = calculator();
    calc.set_current_fuel(Pounds::new(1200.0));
    calc.set_desired_fuel(Pounds::new(2000.0));

    let r = calc.receipt();
    assert_eq!(r.fuel_difference, Pounds::new(800.0));
    assert_eq!(r.direction, FuelDirection::Add);

    let diff = r.difference_volume.expect("density is usable");
    assert_eq!(diff.unit_label(), "GAL");
    assert_relative_eq!(diff.value(), 800.0 / 6.7, epsilon = 1e-9);
    assert_eq!(format!("{diff}"), "119.4 GAL");

    assert_eq!(r.per_side_fuel, Pounds::new(400.0));
    let per_side = r.per_side_volume.unwrap();
    assert_eq!(per_side.to_string(), "59.7 GAL");
    assert_eq!(r.per_side_fuel.to_string(), "400.0 lbs");
}

#[test]
fn test_current_and_desired_volumes() {
    let mut calc = calculator();
    calc.set_current_fuel(Pounds::new(1340.0));
    calc.set_desired_fuel(Pounds::new(2010.0));

    let r = calc.receipt();
    assert_relative_eq!(r.current_volume.unwrap().value(), 200.0, epsilon = 1e-9);
    assert_relative_eq!(r.desired_volume.unwrap().value(), 300.0, epsilon = 1e-9);
}

#[test]
fn test_unit_switch_keeps_density_and_converts_temperature() {
    let mut calc = calculator();
    calc.set_current_fuel(Pounds::new(1200.0));
    calc.set_desired_fuel(Pounds::new(2000.0));
    let density_before = calc.fuel_state().density;

    calc.set_unit_system(UnitSystem::Metric);

    let state = calc.fuel_state();
    assert_eq!(state.temperature, 15.0);
    assert_eq!(state.density, density_before);
    assert_eq!(state.current_fuel, Pounds::new(1200.0));

    let r = calc.receipt();
    let diff = r.difference_volume.unwrap();
    assert_eq!(diff.unit_label(), "L");
    assert_relative_eq!(diff.value(), 800.0 / 6.7 * 3.78541, epsilon = 1e-9);
    // raw 15 is compared with the 59°F default
    assert!(r.temperature_changed);
    assert_eq!(r.standard_temperature, 15.0);
    assert!(!r.outside_standard_day);
}

#[test]
fn test_unit_switch_round_trip_on_warm_day() {
    let mut calc = calculator();
    calc.set_temperature(86.0);
    let warm = calc.fuel_state().density;
    assert_eq!(
        warm,
        adjust_density_for_temperature(PoundsPerGallon::new(6.7), 86.0, UnitSystem::Imperial)
    );

    // 86°F is exactly 30°C
    calc.set_unit_system(UnitSystem::Metric);
    assert_eq!(calc.fuel_state().temperature, 30.0);
    assert_eq!(calc.fuel_state().density, warm);

    calc.set_unit_system(UnitSystem::Imperial);
    assert_eq!(calc.fuel_state().temperature, 86.0);
    assert_eq!(calc.fuel_state().density, warm);
}

#[test]
fn test_warm_fuel_needs_more_volume() {
    let mut calc = calculator();
    calc.set_desired_fuel(Pounds::new(1000.0));
    let standard = calc.receipt().difference_volume.unwrap().value();

    calc.set_temperature(99.0);
    let r = calc.receipt();
    assert_eq!(r.density, PoundsPerGallon::new(6.56));
    assert!(r.difference_volume.unwrap().value() > standard);
    assert!(r.density_changed);
    assert!(r.temperature_changed);
}

#[test]
fn test_over_capacity_entry_is_clamped() {
    let mut calc = calculator();
    calc.set_current_fuel(Pounds::new(5000.0));
    assert_eq!(calc.fuel_state().current_fuel, Pounds::new(2704.0));
    assert!(calc.receipt().current_near_max);
    assert_relative_eq!(calc.receipt().current_fill, 1.0, epsilon = 1e-12);
}

#[test]
fn test_manual_density_is_transient() {
    let mut calc = calculator();
    calc.set_density(PoundsPerGallon::new(6.9));
    assert!(calc.receipt().density_changed);
    assert!(calc.receipt().outside_standard_day);

    calc.set_temperature(59.0);
    assert_eq!(calc.fuel_state().density, PoundsPerGallon::new(6.7));
    assert!(!calc.receipt().density_changed);
}

#[test]
fn test_manual_density_drives_volumes() {
    let mut calc = calculator();
    calc.set_desired_fuel(Pounds::new(700.0));
    calc.set_density(PoundsPerGallon::new(7.0));

    let gallons = calc.receipt().desired_volume.unwrap().value();
    assert_relative_eq!(
        gallons,
        *pounds_to_gallons(Pounds::new(700.0), PoundsPerGallon::new(7.0)),
        epsilon = 1e-12
    );
}

#[test]
fn test_zero_density_hides_volumes() {
    let mut calc = calculator();
    calc.set_desired_fuel(Pounds::new(700.0));
    calc.set_density(PoundsPerGallon::new(0.0));

    let r = calc.receipt();
    assert!(r.desired_volume.is_none());
    assert!(r.per_side_volume.is_none());
    assert_eq!(r.per_side_fuel, Pounds::new(350.0));
}

#[test]
fn test_reset_conditions_clears_flags() {
    let mut calc = calculator();
    calc.set_temperature(20.0);
    calc.set_density(PoundsPerGallon::new(7.2));
    calc.reset_conditions();

    let r = calc.receipt();
    assert!(!r.density_changed);
    assert!(!r.temperature_changed);
    assert!(!r.outside_standard_day);
}

#[test]
fn test_preset_fills_desired_load() {
    let mut calc = calculator();
    calc.set_current_fuel(Pounds::new(2200.0));
    calc.apply_preset();

    let r = calc.receipt();
    assert_eq!(r.desired_fuel, Pounds::new(2000.0));
    assert_eq!(r.direction, FuelDirection::Remove);
    assert_eq!(r.per_side_fuel, Pounds::new(100.0));
}
