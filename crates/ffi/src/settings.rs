use fuel_calc_core::SettingsBounds;

use crate::error::FuelCalcErrorCode;
use crate::helpers::{
    handle_ffi_result_error, instance_from_ptr, mutate_with_value, with_calculator_mut,
};
use crate::instance::{FuelCalcInstance, SharedCalculator};

/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
unsafe fn reset_setting(
    ptr: *const FuelCalcInstance,
    f: fn(&mut SharedCalculator),
) -> FuelCalcErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_calculator_mut(instance, f)
    })
}

/// Set the tank capacity in pounds (clamped to be non-negative).
///
/// Stored loads above the new capacity are left as they are until they are
/// next edited.
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
pub unsafe extern "C" fn fuel_calc_set_max_fuel_load(
    ptr: *const FuelCalcInstance,
    pounds: f64,
) -> FuelCalcErrorCode {
    unsafe {
        mutate_with_value(ptr, "pounds", pounds, |calc, v| {
            calc.set_max_fuel_load(SettingsBounds::clamp_max_fuel_load(v));
        })
    }
}

/// Set the standard-day density (clamped to 5..=8 lbs/gal). The fuel
/// state's density is re-derived from it.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_default_density(
    ptr: *const FuelCalcInstance,
    pounds_per_gallon: f64,
) -> FuelCalcErrorCode {
    unsafe {
        mutate_with_value(ptr, "pounds_per_gallon", pounds_per_gallon, |calc, v| {
            calc.set_default_density(SettingsBounds::clamp_default_density(v));
        })
    }
}

/// Set the load the preset fills to, in pounds (clamped to be non-negative).
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_default_preset_load(
    ptr: *const FuelCalcInstance,
    pounds: f64,
) -> FuelCalcErrorCode {
    unsafe {
        mutate_with_value(ptr, "pounds", pounds, |calc, v| {
            calc.set_default_preset_load(SettingsBounds::clamp_default_preset_load(v));
        })
    }
}

/// Set the standard temperature in °F (clamped to -22..=122).
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_default_temperature(
    ptr: *const FuelCalcInstance,
    fahrenheit: f64,
) -> FuelCalcErrorCode {
    unsafe {
        mutate_with_value(ptr, "fahrenheit", fahrenheit, |calc, v| {
            calc.set_default_temperature(SettingsBounds::clamp_default_temperature(v));
        })
    }
}

/// Turn fuel state persistence on or off. Turning it off deletes the saved
/// fuel state.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_set_persist_settings(
    ptr: *const FuelCalcInstance,
    persist: bool,
) -> FuelCalcErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_calculator_mut(instance, |calc| calc.set_persist_settings(persist))
    })
}

/// Restore the factory capacity (2704 lbs).
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_reset_max_fuel_load(
    ptr: *const FuelCalcInstance,
) -> FuelCalcErrorCode {
    unsafe { reset_setting(ptr, SharedCalculator::reset_max_fuel_load) }
}

/// Restore the factory density (6.7 lbs/gal).
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_reset_default_density(
    ptr: *const FuelCalcInstance,
) -> FuelCalcErrorCode {
    unsafe { reset_setting(ptr, SharedCalculator::reset_default_density) }
}

/// Restore the factory standard temperature (59 °F).
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_reset_default_temperature(
    ptr: *const FuelCalcInstance,
) -> FuelCalcErrorCode {
    unsafe { reset_setting(ptr, SharedCalculator::reset_default_temperature) }
}
