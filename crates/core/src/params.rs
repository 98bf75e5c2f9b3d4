//! Tolerant extraction of typed values from a flat JSON parameter object.
//!
//! A missing key or a value of the wrong JSON type yields the default.
//! Range checks happen later, in [`FieldConfig::validate`](crate::config::FieldConfig::validate).

use crate::color::Srgb;
use crate::error::BackdropError;
use serde_json::Value;

/// Reads a number (integers included) as `f64`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads a non-negative integer that fits in `u32`.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Reads a hex color string.
///
/// Non-string values fall back to `default`; a string that is present but
/// malformed is an error, since silently replacing a typo'd color hides it.
pub fn param_color(params: &Value, name: &str, default: Srgb) -> Result<Srgb, BackdropError> {
    match params.get(name).and_then(Value::as_str) {
        Some(hex) => Srgb::from_hex(hex),
        None => Ok(default),
    }
}
