//! Scalar views over text values
//!
//! Values are always stored as text. These helpers convert to and from
//! the typed forms exposed by the store's typed getters and setters.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("Malformed {kind} value: '{value}'")]
    Malformed { kind: &'static str, value: String },
}

impl ValueError {
    fn malformed(kind: &'static str, value: &str) -> Self {
        ValueError::Malformed {
            kind,
            value: value.to_string(),
        }
    }
}

/// Parses a boolean from `true`/`yes`/`1` or `false`/`no`/`0` (ASCII case-insensitive)
pub fn parse_bool(value: &str) -> Result<bool, ValueError> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ValueError::malformed("boolean", value)),
    }
}

/// Parses a signed decimal integer
pub fn parse_int(value: &str) -> Result<i64, ValueError> {
    let value = value.trim();
    value
        .parse()
        .map_err(|_| ValueError::malformed("integer", value))
}

/// Parses a decimal floating point number
pub fn parse_float(value: &str) -> Result<f64, ValueError> {
    let value = value.trim();
    value
        .parse()
        .map_err(|_| ValueError::malformed("float", value))
}

/// Canonical text form of a boolean
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Canonical text form of a float
///
/// Whole numbers keep a trailing `.0` so the value still reads as a float.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
