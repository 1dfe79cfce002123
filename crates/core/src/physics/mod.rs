//! Fuel arithmetic: unit conversion and temperature-corrected density

pub mod conversion;
pub mod density;

pub use conversion::{
    gallons_to_liters, gallons_to_pounds, is_usable_density, liters_to_gallons, liters_to_pounds,
    pounds_to_gallons, pounds_to_liters, pounds_to_volume,
};
pub use density::{
    adjust_density_for_temperature, celsius_to_fahrenheit, convert_temperature, expected_density,
    fahrenheit_to_celsius, standard_temperature, TemperatureLimits,
};
