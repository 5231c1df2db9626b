//! Display rules for metric values.
//!
//! Ratios stored as fractions (margins, ROE) need `multiplier = 100`; values
//! the provider already reports in percentage points use `multiplier = 1`.

/// Rendered in place of any unknown value
pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_percent(value: Option<f64>, multiplier: f64, decimals: usize) -> String {
    format_number(value, multiplier, decimals, "%")
}

pub fn format_number(value: Option<f64>, multiplier: f64, decimals: usize, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.*}{}", decimals, v * multiplier, suffix),
        None => NOT_AVAILABLE.to_string(),
    }
}
