use fuel_calc_core::input::parse_field;
use fuel_calc_core::{FieldBounds, Pounds, PoundsPerGallon, UnitSystem};
use std::ffi::CStr;
use std::os::raw::c_char;

use crate::error::{DefaultFuelCalcError, FuelCalcErrorCode};
use crate::helpers::{
    handle_ffi_result_error, instance_from_ptr, mutate_with_value, track_error,
    with_calculator_mut,
};
use crate::instance::{FuelCalcInstance, SharedCalculator};

/// Display unit system.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelCalcUnitSystem {
    /// Gallons and °F
    Imperial = 0,
    /// Liters and °C
    Metric = 1,
}

impl From<FuelCalcUnitSystem> for UnitSystem {
    fn from(unit_system: FuelCalcUnitSystem) -> Self {
        match unit_system {
            FuelCalcUnitSystem::Imperial => UnitSystem::Imperial,
            FuelCalcUnitSystem::Metric => UnitSystem::Metric,
        }
    }
}

impl From<UnitSystem> for FuelCalcUnitSystem {
    fn from(unit_system: UnitSystem) -> Self {
        match unit_system {
            UnitSystem::Imperial => FuelCalcUnitSystem::Imperial,
            UnitSystem::Metric => FuelCalcUnitSystem::Metric,
        }
    }
}

/// Editable fuel state field for `fuel_calc_set_field_text`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelCalcField {
    /// Fuel on board (lbs)
    CurrentFuel = 0,
    /// Fuel wanted (lbs)
    DesiredFuel = 1,
    /// Density override (lbs/gal)
    Density = 2,
    /// Temperature in the active unit system's scale
    Temperature = 3,
}

impl FuelCalcField {
    fn bounds(self, calc: &SharedCalculator) -> FieldBounds {
        match self {
            FuelCalcField::CurrentFuel | FuelCalcField::DesiredFuel => {
                FieldBounds::fuel(calc.settings())
            }
            FuelCalcField::Density => FieldBounds::density(),
            FuelCalcField::Temperature => FieldBounds::temperature(calc.fuel_state().unit_system),
        }
    }

    fn apply(self, calc: &mut SharedCalculator, value: f64) {
        match self {
            FuelCalcField::CurrentFuel => calc.set_current_fuel(Pounds::new(value)),
            FuelCalcField::DesiredFuel => calc.set_desired_fuel(Pounds::new(value)),
            FuelCalcField::Density => calc.set_density(PoundsPerGallon::new(value)),
            FuelCalcField::Temperature => calc.set_temperature(value),
        }
    }
}

/// Set the fuel on board in pounds (clamped to the configured capacity).
///
/// Returns
/// - `FuelCalcErrorCode::Ok` (0) on success
/// - `FuelCalcErrorCode::NullPointer` if `ptr` is null
/// - `FuelCalcErrorCode::InvalidParameter` if `pounds` is not finite
/// - `FuelCalcErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_current_fuel(
    ptr: *const FuelCalcInstance,
    pounds: f64,
) -> FuelCalcErrorCode {
    unsafe {
        mutate_with_value(ptr, "pounds", pounds, |calc, v| {
            calc.set_current_fuel(Pounds::new(v));
        })
    }
}

/// Set the wanted fuel load in pounds (clamped to the configured capacity).
///
/// Return codes as for `fuel_calc_set_current_fuel`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_desired_fuel(
    ptr: *const FuelCalcInstance,
    pounds: f64,
) -> FuelCalcErrorCode {
    unsafe {
        mutate_with_value(ptr, "pounds", pounds, |calc, v| {
            calc.set_desired_fuel(Pounds::new(v));
        })
    }
}

/// Override the density (lbs/gal). Stored as given; the next temperature
/// or unit change re-derives it.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_density(
    ptr: *const FuelCalcInstance,
    pounds_per_gallon: f64,
) -> FuelCalcErrorCode {
    unsafe {
        mutate_with_value(ptr, "pounds_per_gallon", pounds_per_gallon, |calc, v| {
            calc.set_density(PoundsPerGallon::new(v));
        })
    }
}

/// Set the fuel temperature in the active unit system's scale; density follows.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_temperature(
    ptr: *const FuelCalcInstance,
    temperature: f64,
) -> FuelCalcErrorCode {
    unsafe {
        mutate_with_value(ptr, "temperature", temperature, |calc, v| {
            calc.set_temperature(v);
        })
    }
}

/// Switch the display unit system. The stored temperature is converted and
/// density re-derived; selecting the active system does nothing.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_unit_system(
    ptr: *const FuelCalcInstance,
    unit_system: FuelCalcUnitSystem,
) -> FuelCalcErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_calculator_mut(instance, |calc| calc.set_unit_system(unit_system.into()))
    })
}

/// Set the desired load to the configured preset.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_apply_preset(ptr: *const FuelCalcInstance) -> FuelCalcErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_calculator_mut(instance, SharedCalculator::apply_preset)
    })
}

/// Return density and temperature to the configured standard conditions.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_reset_conditions(
    ptr: *const FuelCalcInstance,
) -> FuelCalcErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_calculator_mut(instance, SharedCalculator::reset_conditions)
    })
}

/// Parse typed text for a field, validate it against the field's range and
/// apply it.
///
/// Empty text reads as zero for the fuel fields. A literal `"0"` is accepted
/// for every field.
///
/// Parameters
/// - `text`: What the user typed (null-terminated UTF-8)
/// - `out_approaching_max`: Set to true when a fuel load is above 90% of
///   capacity. May be null if the caller does not need the advisory.
///
/// Returns
/// - `FuelCalcErrorCode::Ok` (0) on success
/// - `FuelCalcErrorCode::NullPointer` if `ptr` or `text` is null
/// - `FuelCalcErrorCode::InvalidParameter` if `text` is not UTF-8
/// - `FuelCalcErrorCode::InvalidInput` if `text` is not a number or out of range;
///   the state is left unchanged
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `fuel_calc_new`.
/// - `text` must be null or a valid null-terminated string.
/// - `out_approaching_max` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_field_text(
    ptr: *const FuelCalcInstance,
    field: FuelCalcField,
    text: *const c_char,
    out_approaching_max: *mut bool,
) -> FuelCalcErrorCode {
    if text.is_null() {
        return track_error(&DefaultFuelCalcError::null_pointer("text"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let text = unsafe { CStr::from_ptr(text) }
            .to_str()
            .map_err(|_| DefaultFuelCalcError::invalid_parameter("text", "must be UTF-8"))?;

        let parsed = with_calculator_mut(instance, |calc| {
            parse_field(text, &field.bounds(calc)).map(|parsed| {
                field.apply(calc, parsed.value);
                parsed
            })
        })?
        .map_err(|e| DefaultFuelCalcError::invalid_input(&e))?;

        if !out_approaching_max.is_null() {
            unsafe {
                *out_approaching_max = parsed.approaching_max;
            }
        }
        Ok(())
    })
}
