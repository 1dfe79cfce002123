use fuel_calc_core::{FuelCalculator, FuelStorage, JsonFileStorage, MemoryStorage};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::sync::RwLock;

use crate::error::{DefaultFuelCalcError, FuelCalcErrorCode};
use crate::helpers::{clear_last_error, track_error, track_result};

/// Storage backend chosen at creation time
pub(crate) type DynStorage = Box<dyn FuelStorage + Send + Sync>;

/// Calculator type held behind the lock
pub(crate) type SharedCalculator = FuelCalculator<DynStorage>;

/// The fuel calculator context handed to C callers.
///
/// # Thread Safety
/// The calculator is protected by an `RwLock`: queries take a read lock and
/// mutations take the write lock, so one instance can be shared between a UI
/// thread and worker threads. Each mutation persists before the lock is
/// released.
pub struct FuelCalcInstance {
    pub(crate) calc: RwLock<SharedCalculator>,
}

impl FuelCalcInstance {
    /// Creates an instance backed by `storage`, restoring whatever it holds.
    pub(crate) fn new(storage: DynStorage) -> Box<Self> {
        Box::new(Self {
            calc: RwLock::new(FuelCalculator::new(storage)),
        })
    }

    /// Picks the storage backend from an optional directory path.
    ///
    /// # Safety
    /// `storage_dir` must be null or a valid null-terminated string.
    unsafe fn storage_from_dir(storage_dir: *const c_char) -> Result<DynStorage, DefaultFuelCalcError> {
        if storage_dir.is_null() {
            return Ok(Box::new(MemoryStorage::new()));
        }

        let dir = unsafe { CStr::from_ptr(storage_dir) }
            .to_str()
            .map_err(|_| DefaultFuelCalcError::invalid_parameter("storage_dir", "must be UTF-8"))?;
        if dir.is_empty() {
            return Err(DefaultFuelCalcError::invalid_parameter(
                "storage_dir",
                "must not be empty",
            ));
        }

        Ok(Box::new(JsonFileStorage::new(dir)))
    }
}

/// Create a new calculator instance and return it via out-parameter.
///
/// Parameters
/// - `storage_dir`: Directory holding the saved fuel state and settings, or
///   null to keep everything in memory for the lifetime of the instance.
///   The directory is created on the first save.
/// - `out_instance`: Pointer to receive the created instance. Must be non-null.
///   - On success: set to valid `FuelCalcInstance` pointer
///   - On failure: set to null
///
/// Returns
/// - `FuelCalcErrorCode::Ok` (0): success, `out_instance` contains valid pointer
/// - `FuelCalcErrorCode::NullPointer`: `out_instance` is null
/// - `FuelCalcErrorCode::InvalidParameter`: `storage_dir` is empty or not UTF-8
///
/// Unreadable or corrupt saved files are not an error: the instance starts
/// from defaults.
///
/// # Safety
///
/// - `storage_dir` must be null or a valid null-terminated string.
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `fuel_calc_destroy` exactly once.
///
/// Example (C)
/// ```c
/// FuelCalcInstance* calc = NULL;
/// if (fuel_calc_new("/var/lib/fuel", &calc) != Ok) {
///     fprintf(stderr, "%s\n", fuel_calc_get_last_error());
///     return;
/// }
/// fuel_calc_destroy(calc);
/// ```
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_new(
    storage_dir: *const c_char,
    out_instance: *mut *mut FuelCalcInstance,
) -> FuelCalcErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultFuelCalcError::null_pointer("out_instance"));
    }

    match track_result(unsafe { FuelCalcInstance::storage_from_dir(storage_dir) }) {
        Ok(storage) => {
            unsafe {
                *out_instance = Box::into_raw(FuelCalcInstance::new(storage));
            }
            clear_last_error();
            FuelCalcErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an instance previously created by `fuel_calc_new`.
///
/// If `ptr` is null this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `fuel_calc_new`.
/// - The pointer MUST NOT have been freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_destroy(ptr: *mut FuelCalcInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `fuel_calc_new` and not yet freed.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
