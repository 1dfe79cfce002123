//! C ABI for the fuel load calculator.
//!
//! An opaque [`instance::FuelCalcInstance`] is created with `fuel_calc_new`,
//! mutated through the `fuel_calc_set_*` / `fuel_calc_reset_*` functions and
//! read back with `fuel_calc_get_receipt`, `fuel_calc_get_state` and
//! `fuel_calc_get_settings`. Every fallible call returns a
//! [`error::FuelCalcErrorCode`]; the message for the last failure on the
//! calling thread is available from `fuel_calc_get_last_error`.

mod error;
mod helpers;
pub mod instance;
pub mod queries;
pub mod settings;
pub mod state;

pub use error::{fuel_calc_get_last_error, fuel_calc_get_last_error_code, FuelCalcErrorCode};

#[cfg(test)]
mod tests {
    use super::instance::{fuel_calc_destroy, fuel_calc_new, FuelCalcInstance};
    use super::queries::{
        fuel_calc_get_receipt, fuel_calc_get_settings, fuel_calc_get_state, FuelCalcDirection,
        FuelReceiptFfi, FuelSettingsFfi, FuelStateFfi,
    };
    use super::settings::{fuel_calc_reset_default_density, fuel_calc_set_default_density};
    use super::state::{
        fuel_calc_apply_preset, fuel_calc_set_current_fuel, fuel_calc_set_desired_fuel,
        fuel_calc_set_field_text, fuel_calc_set_unit_system, FuelCalcField, FuelCalcUnitSystem,
    };
    use super::*;
    use std::ffi::{CStr, CString};
    use std::mem::MaybeUninit;
    use std::ptr;

    fn new_in_memory() -> *mut FuelCalcInstance {
        let mut calc = ptr::null_mut();
        let err = unsafe { fuel_calc_new(ptr::null(), &mut calc) };
        assert_eq!(err, FuelCalcErrorCode::Ok);
        assert!(!calc.is_null());
        calc
    }

    fn receipt(calc: *const FuelCalcInstance) -> FuelReceiptFfi {
        let mut out = MaybeUninit::<FuelReceiptFfi>::uninit();
        let err = unsafe { fuel_calc_get_receipt(calc, out.as_mut_ptr()) };
        assert_eq!(err, FuelCalcErrorCode::Ok);
        unsafe { out.assume_init() }
    }

    fn last_error() -> String {
        let msg = fuel_calc_get_last_error();
        assert!(!msg.is_null());
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }

    #[test]
    fn test_receipt_through_c_api() {
        let calc = new_in_memory();
        unsafe {
            assert_eq!(fuel_calc_set_current_fuel(calc, 1200.0), FuelCalcErrorCode::Ok);
            assert_eq!(fuel_calc_set_desired_fuel(calc, 2000.0), FuelCalcErrorCode::Ok);
        }

        let r = receipt(calc);
        assert_eq!(r.direction, FuelCalcDirection::Add);
        assert_eq!(r.fuel_difference, 800.0);
        assert_eq!(r.per_side_fuel, 400.0);
        assert!(r.volumes_valid);
        assert!((r.difference_volume - 800.0 / 6.7).abs() < 1e-9);
        assert_eq!(r.unit_system, FuelCalcUnitSystem::Imperial);

        unsafe { fuel_calc_destroy(calc) };
    }

    #[test]
    fn test_unit_switch_and_state_query() {
        let calc = new_in_memory();
        unsafe {
            fuel_calc_set_unit_system(calc, FuelCalcUnitSystem::Metric);
        }

        let mut state = MaybeUninit::<FuelStateFfi>::uninit();
        let err = unsafe { fuel_calc_get_state(calc, state.as_mut_ptr()) };
        assert_eq!(err, FuelCalcErrorCode::Ok);
        let state = unsafe { state.assume_init() };
        assert_eq!(state.unit_system, FuelCalcUnitSystem::Metric);
        assert_eq!(state.temperature, 15.0);

        unsafe { fuel_calc_destroy(calc) };
    }

    #[test]
    fn test_field_text_validation() {
        let calc = new_in_memory();
        let mut warn = false;

        let text = CString::new("2500").unwrap();
        let err = unsafe {
            fuel_calc_set_field_text(calc, FuelCalcField::CurrentFuel, text.as_ptr(), &mut warn)
        };
        assert_eq!(err, FuelCalcErrorCode::Ok);
        assert!(warn);

        let text = CString::new("12lbs").unwrap();
        let err = unsafe {
            fuel_calc_set_field_text(calc, FuelCalcField::DesiredFuel, text.as_ptr(), &mut warn)
        };
        assert_eq!(err, FuelCalcErrorCode::InvalidInput);
        assert_eq!(fuel_calc_get_last_error_code(), FuelCalcErrorCode::InvalidInput);
        assert!(last_error().contains("12lbs"));

        let text = CString::new("9.5").unwrap();
        let err = unsafe {
            fuel_calc_set_field_text(calc, FuelCalcField::Density, text.as_ptr(), ptr::null_mut())
        };
        assert_eq!(err, FuelCalcErrorCode::InvalidInput);

        // rejected text leaves the state alone
        let r = receipt(calc);
        assert_eq!(r.current_fuel, 2500.0);
        assert_eq!(r.desired_fuel, 0.0);
        assert_eq!(r.density, 6.7);

        unsafe { fuel_calc_destroy(calc) };
    }

    #[test]
    fn test_settings_are_clamped_and_reset() {
        let calc = new_in_memory();
        unsafe {
            assert_eq!(fuel_calc_set_default_density(calc, 9.0), FuelCalcErrorCode::Ok);
        }

        let mut settings = MaybeUninit::<FuelSettingsFfi>::uninit();
        unsafe { fuel_calc_get_settings(calc, settings.as_mut_ptr()) };
        let settings = unsafe { settings.assume_init() };
        assert_eq!(settings.default_density, 8.0);
        assert_eq!(receipt(calc).density, 8.0);

        unsafe {
            fuel_calc_reset_default_density(calc);
            fuel_calc_apply_preset(calc);
        }
        let r = receipt(calc);
        assert_eq!(r.density, 6.7);
        assert_eq!(r.desired_fuel, 2000.0);

        unsafe { fuel_calc_destroy(calc) };
    }

    #[test]
    fn test_errors_are_reported() {
        let err = unsafe { fuel_calc_set_current_fuel(ptr::null(), 100.0) };
        assert_eq!(err, FuelCalcErrorCode::NullPointer);
        assert_eq!(last_error(), "Parameter 'ptr' cannot be null");

        let calc = new_in_memory();
        let err = unsafe { fuel_calc_set_current_fuel(calc, f64::NAN) };
        assert_eq!(err, FuelCalcErrorCode::InvalidParameter);

        // success clears the error
        let err = unsafe { fuel_calc_set_current_fuel(calc, 100.0) };
        assert_eq!(err, FuelCalcErrorCode::Ok);
        assert!(fuel_calc_get_last_error().is_null());

        let err = unsafe { fuel_calc_new(ptr::null(), ptr::null_mut()) };
        assert_eq!(err, FuelCalcErrorCode::NullPointer);

        unsafe { fuel_calc_destroy(calc) };
    }

    #[test]
    fn test_state_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = CString::new(dir.path().to_str().unwrap()).unwrap();

        let mut calc = ptr::null_mut();
        unsafe {
            assert_eq!(fuel_calc_new(path.as_ptr(), &mut calc), FuelCalcErrorCode::Ok);
            fuel_calc_set_current_fuel(calc, 1500.0);
            fuel_calc_destroy(calc);
        }

        let mut calc = ptr::null_mut();
        unsafe {
            assert_eq!(fuel_calc_new(path.as_ptr(), &mut calc), FuelCalcErrorCode::Ok);
        }
        assert_eq!(receipt(calc).current_fuel, 1500.0);
        unsafe { fuel_calc_destroy(calc) };
    }
}
