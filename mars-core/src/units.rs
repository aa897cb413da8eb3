//! Unit conversion and rounding helpers used when normalizing forecast data.

/// Convert a Celsius reading to Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Celsius to Fahrenheit, rounded for display.
pub fn display_fahrenheit(celsius: f64) -> f64 {
    round2(celsius_to_fahrenheit(celsius))
}
