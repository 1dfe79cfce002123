use fuel_calc_core::InputError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - the error code passed across the FFI boundary
/// - `msg()` - the diagnostic message kept for `fuel_calc_get_last_error`
pub(crate) trait FuelCalcError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> FuelCalcErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FuelCalcError` for the FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFuelCalcError {
    code: FuelCalcErrorCode,
    msg: String,
}

impl DefaultFuelCalcError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FuelCalcErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: FuelCalcErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for an invalid parameter value.
    ///
    /// # Arguments
    /// * `param_name` - The name of the invalid parameter (e.g., `"pounds"`, `"storage_dir"`)
    /// * `message` - A description of the validation error
    pub fn invalid_parameter(param_name: &str, message: &str) -> Self {
        Self {
            code: FuelCalcErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}': {message}"),
        }
    }

    /// Create error for a number that must be finite.
    pub fn non_finite(param_name: &str, value: f64) -> Self {
        Self::invalid_parameter(param_name, &format!("must be finite, got {value}"))
    }

    /// Create error for typed text rejected by the input boundary.
    pub fn invalid_input(error: &InputError) -> Self {
        Self {
            code: FuelCalcErrorCode::InvalidInput,
            msg: error.to_string(),
        }
    }
}

impl FuelCalcError for DefaultFuelCalcError {
    fn code(&self) -> FuelCalcErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by fuel calculator functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelCalcErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid parameter passed to function (non-finite number, non-UTF-8 string).
    InvalidParameter = 3,

    /// Typed text was not a number or was outside the field's range.
    InvalidInput = 4,
}

impl From<DefaultFuelCalcError> for FuelCalcErrorCode {
    fn from(error: DefaultFuelCalcError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    static LAST_ERROR: RefCell<(Option<CString>, FuelCalcErrorCode)> = const { RefCell::new((None, FuelCalcErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FuelCalcErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FuelCalcErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// FuelCalcErrorCode err = fuel_calc_set_field_text(calc, CurrentFuel, "12lbs", &warn);
/// if (err != Ok) {
///     const char* error = fuel_calc_get_last_error();
///     if (error) {
///         printf("Rejected: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fuel_calc_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
///
/// Returns `FuelCalcErrorCode::Ok` (0) if the last call succeeded.
#[no_mangle]
pub extern "C" fn fuel_calc_get_last_error_code() -> FuelCalcErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
