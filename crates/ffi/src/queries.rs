use fuel_calc_core::{DerivedReceipt, FuelDirection, FuelState, Settings, Volume};

use crate::error::{DefaultFuelCalcError, FuelCalcErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_calculator};
use crate::instance::FuelCalcInstance;
use crate::state::FuelCalcUnitSystem;

/// Whether fuel has to be pumped in or drained.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelCalcDirection {
    /// Desired load is above current load
    Add = 0,
    /// Desired load is at or below current load
    Remove = 1,
}

impl From<FuelDirection> for FuelCalcDirection {
    fn from(direction: FuelDirection) -> Self {
        match direction {
            FuelDirection::Add => FuelCalcDirection::Add,
            FuelDirection::Remove => FuelCalcDirection::Remove,
        }
    }
}

#[repr(C)]
/// FFI-friendly snapshot of the fuel receipt.
/// Keep this layout stable for C/C++/C# consumers.
///
/// Volumes are in gallons for `Imperial` and liters for `Metric`. When
/// `volumes_valid` is false the density cannot produce a volume and every
/// volume field is 0; show the pound values only.
pub struct FuelReceiptFfi {
    /// Unit system the volumes and temperature are expressed in.
    pub unit_system: FuelCalcUnitSystem,
    /// Density used for the volumes (lbs/gal).
    pub density: f64,
    /// Temperature in the unit system's scale.
    pub temperature: f64,

    /// Fuel on board (lbs).
    pub current_fuel: f64,
    /// Fuel wanted (lbs).
    pub desired_fuel: f64,
    /// `desired - current`, signed (lbs).
    pub fuel_difference: f64,
    /// Add or remove.
    pub direction: FuelCalcDirection,

    /// False when the density is zero, negative or non-finite.
    pub volumes_valid: bool,
    /// Volume on board.
    pub current_volume: f64,
    /// Wanted volume.
    pub desired_volume: f64,
    /// Magnitude of the volume difference.
    pub difference_volume: f64,

    /// Half the difference (lbs).
    pub per_side_fuel: f64,
    /// Half the difference volume.
    pub per_side_volume: f64,

    /// Density differs from the configured default.
    pub density_changed: bool,
    /// Temperature differs from the configured default.
    pub temperature_changed: bool,
    /// Default density corrected for the current temperature (lbs/gal).
    pub expected_density: f64,
    /// Configured standard temperature in the unit system's scale.
    pub standard_temperature: f64,
    /// Density or temperature is off the standard day in the active scale.
    pub outside_standard_day: bool,

    /// Current load as a fraction of capacity.
    pub current_fill: f64,
    /// Desired load as a fraction of capacity.
    pub desired_fill: f64,
    /// Current load is above 90% of capacity.
    pub current_near_max: bool,
    /// Desired load is above 90% of capacity.
    pub desired_near_max: bool,
}

fn volume_value(volume: Option<Volume>) -> f64 {
    volume.map_or(0.0, Volume::value)
}

impl From<&DerivedReceipt> for FuelReceiptFfi {
    fn from(r: &DerivedReceipt) -> Self {
        Self {
            unit_system: r.unit_system.into(),
            density: *r.density,
            temperature: r.temperature,
            current_fuel: *r.current_fuel,
            desired_fuel: *r.desired_fuel,
            fuel_difference: *r.fuel_difference,
            direction: r.direction.into(),
            volumes_valid: r.difference_volume.is_some(),
            current_volume: volume_value(r.current_volume),
            desired_volume: volume_value(r.desired_volume),
            difference_volume: volume_value(r.difference_volume),
            per_side_fuel: *r.per_side_fuel,
            per_side_volume: volume_value(r.per_side_volume),
            density_changed: r.density_changed,
            temperature_changed: r.temperature_changed,
            expected_density: *r.expected_density,
            standard_temperature: r.standard_temperature,
            outside_standard_day: r.outside_standard_day,
            current_fill: r.current_fill,
            desired_fill: r.desired_fill,
            current_near_max: r.current_near_max,
            desired_near_max: r.desired_near_max,
        }
    }
}

#[repr(C)]
/// FFI-friendly copy of the stored fuel state.
pub struct FuelStateFfi {
    /// Fuel on board (lbs).
    pub current_fuel: f64,
    /// Fuel wanted (lbs).
    pub desired_fuel: f64,
    /// Density (lbs/gal).
    pub density: f64,
    /// Temperature in the unit system's scale.
    pub temperature: f64,
    /// Display unit system.
    pub unit_system: FuelCalcUnitSystem,
}

impl From<&FuelState> for FuelStateFfi {
    fn from(state: &FuelState) -> Self {
        Self {
            current_fuel: *state.current_fuel,
            desired_fuel: *state.desired_fuel,
            density: *state.density,
            temperature: state.temperature,
            unit_system: state.unit_system.into(),
        }
    }
}

#[repr(C)]
/// FFI-friendly copy of the settings.
pub struct FuelSettingsFfi {
    /// Tank capacity (lbs).
    pub max_fuel_load: f64,
    /// Standard-day density (lbs/gal).
    pub default_density: f64,
    /// Preset load (lbs).
    pub default_preset_load: f64,
    /// Standard temperature (°F).
    pub default_temperature: f64,
    /// Fuel state is saved between sessions.
    pub persist_settings: bool,
}

impl From<&Settings> for FuelSettingsFfi {
    fn from(settings: &Settings) -> Self {
        Self {
            max_fuel_load: *settings.max_fuel_load,
            default_density: *settings.default_density,
            default_preset_load: *settings.default_preset_load,
            default_temperature: *settings.default_temperature,
            persist_settings: settings.persist_settings,
        }
    }
}

/// Project the receipt for the current state into `out_receipt`.
///
/// Thread-safe: acquires the `RwLock` read lock.
///
/// Returns
/// - `FuelCalcErrorCode::Ok` (0) on success with `out_receipt` populated
/// - `FuelCalcErrorCode::NullPointer` if `ptr` or `out_receipt` is null
/// - `FuelCalcErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `fuel_calc_new`.
/// - `out_receipt` must be null or valid for writes.
///
/// # Example Usage (C)
/// ```c
/// FuelReceiptFfi receipt;
/// if (fuel_calc_get_receipt(calc, &receipt) == Ok && receipt.volumes_valid) {
///     printf("%s %.1f per side\n",
///            receipt.direction == Add ? "ADD" : "REMOVE",
///            receipt.per_side_volume);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_get_receipt(
    ptr: *const FuelCalcInstance,
    out_receipt: *mut FuelReceiptFfi,
) -> FuelCalcErrorCode {
    if out_receipt.is_null() {
        return track_error(&DefaultFuelCalcError::null_pointer("out_receipt"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let receipt = with_calculator(instance, |calc| FuelReceiptFfi::from(&calc.receipt()))?;
        unsafe {
            out_receipt.write(receipt);
        }
        Ok(())
    })
}

/// Copy the stored fuel state into `out_state`.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `fuel_calc_new`.
/// - `out_state` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_get_state(
    ptr: *const FuelCalcInstance,
    out_state: *mut FuelStateFfi,
) -> FuelCalcErrorCode {
    if out_state.is_null() {
        return track_error(&DefaultFuelCalcError::null_pointer("out_state"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let state = with_calculator(instance, |calc| FuelStateFfi::from(calc.fuel_state()))?;
        unsafe {
            out_state.write(state);
        }
        Ok(())
    })
}

/// Copy the current settings into `out_settings`.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `fuel_calc_new`.
/// - `out_settings` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn fuel_calc_get_settings(
    ptr: *const FuelCalcInstance,
    out_settings: *mut FuelSettingsFfi,
) -> FuelCalcErrorCode {
    if out_settings.is_null() {
        return track_error(&DefaultFuelCalcError::null_pointer("out_settings"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let settings = with_calculator(instance, |calc| FuelSettingsFfi::from(calc.settings()))?;
        unsafe {
            out_settings.write(settings);
        }
        Ok(())
    })
}
