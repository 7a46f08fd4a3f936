//! Unit conversions.

/// Miles in one kilometer.
pub const MILES_PER_KILOMETER: f64 = 0.621371;

/// Convert a temperature in degrees Celsius to degrees Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn kilometers_to_miles(kilometers: f64) -> f64 {
    kilometers * MILES_PER_KILOMETER
}
