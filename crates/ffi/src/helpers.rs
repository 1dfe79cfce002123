use crate::error::{with_last_error_mut, DefaultFuelCalcError, FuelCalcError, FuelCalcErrorCode};
use crate::instance::{FuelCalcInstance, SharedCalculator};
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FuelCalcError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FuelCalcError) -> FuelCalcErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result and hand back its code.
pub(crate) fn track_result<T, E: FuelCalcError>(result: Result<T, E>) -> Result<T, FuelCalcErrorCode> {
    result.map_err(|e| track_error(&e))
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FuelCalcErrorCode::Ok;
    });
}

/// Run an FFI body, clearing the last error on success and recording it on failure.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> FuelCalcErrorCode
where
    F: FnOnce() -> Result<(), DefaultFuelCalcError>,
{
    match f() {
        Ok(()) => {
            clear_last_error();
            FuelCalcErrorCode::Ok
        }
        Err(e) => track_error(&e),
    }
}

/// Borrow an instance from a raw pointer.
///
/// # Safety
/// `ptr` must be null or a pointer returned by `fuel_calc_new` that has not been destroyed.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const FuelCalcInstance,
) -> Result<&'a FuelCalcInstance, DefaultFuelCalcError> {
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultFuelCalcError::null_pointer("ptr"))
}

/// Run `f` under the read lock.
pub(crate) fn with_calculator<F, T>(
    instance: &FuelCalcInstance,
    f: F,
) -> Result<T, DefaultFuelCalcError>
where
    F: FnOnce(&SharedCalculator) -> T,
{
    let calc = instance
        .calc
        .read()
        .map_err(|_| DefaultFuelCalcError::lock_poisoned("calc"))?;
    Ok(f(&calc))
}

/// Run `f` under the write lock.
pub(crate) fn with_calculator_mut<F, T>(
    instance: &FuelCalcInstance,
    f: F,
) -> Result<T, DefaultFuelCalcError>
where
    F: FnOnce(&mut SharedCalculator) -> T,
{
    let mut calc = instance
        .calc
        .write()
        .map_err(|_| DefaultFuelCalcError::lock_poisoned("calc"))?;
    Ok(f(&mut calc))
}

/// Apply a numeric mutation under the write lock.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fuel_calc_new`.
pub(crate) unsafe fn mutate_with_value<F>(
    ptr: *const FuelCalcInstance,
    param_name: &str,
    value: f64,
    f: F,
) -> FuelCalcErrorCode
where
    F: FnOnce(&mut SharedCalculator, f64),
{
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let value = require_finite(param_name, value)?;
        with_calculator_mut(instance, |calc| f(calc, value))
    })
}

/// Reject NaN and infinities before they reach the core.
pub(crate) fn require_finite(param_name: &str, value: f64) -> Result<f64, DefaultFuelCalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DefaultFuelCalcError::non_finite(param_name, value))
    }
}
