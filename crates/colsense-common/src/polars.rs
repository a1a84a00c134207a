//! Polars AnyValue utility functions.
//!
//! Helpers for turning Polars values into [`Cell`]s and for the numeric text
//! handling shared by every input path.

use polars::prelude::AnyValue;

use crate::cell::Cell;

/// Converts a Polars `AnyValue` into a [`Cell`].
///
/// Floating NaN is treated as null. Temporal and nested values keep their
/// Polars text rendering.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use colsense_common::{Cell, any_to_cell};
///
/// assert_eq!(any_to_cell(AnyValue::Null), Cell::Null);
/// assert_eq!(any_to_cell(AnyValue::Int32(42)), Cell::Int(42));
/// assert_eq!(any_to_cell(AnyValue::String("mm")), Cell::from("mm"));
/// ```
pub fn any_to_cell(value: AnyValue<'_>) -> Cell {
    match value {
        AnyValue::Null => Cell::Null,
        AnyValue::Boolean(b) => Cell::Bool(b),
        AnyValue::Int8(v) => Cell::Int(i64::from(v)),
        AnyValue::Int16(v) => Cell::Int(i64::from(v)),
        AnyValue::Int32(v) => Cell::Int(i64::from(v)),
        AnyValue::Int64(v) => Cell::Int(v),
        AnyValue::UInt8(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt16(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt32(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Cell::Float(v as f64), Cell::Int),
        AnyValue::Float32(v) => Cell::from(f64::from(v)),
        AnyValue::Float64(v) => Cell::from(v),
        AnyValue::String(s) => Cell::Str(s.to_string()),
        AnyValue::StringOwned(s) => Cell::Str(s.to_string()),
        other => Cell::Str(other.to_string()),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use colsense_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(20.0), "20");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Parses a string as `f64`, returning `None` for empty, invalid or NaN text.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_cell_integers() {
        assert_eq!(any_to_cell(AnyValue::Int64(-100)), Cell::Int(-100));
        assert_eq!(any_to_cell(AnyValue::UInt32(7)), Cell::Int(7));
        assert_eq!(
            any_to_cell(AnyValue::UInt64(u64::MAX)),
            Cell::Float(u64::MAX as f64)
        );
    }

    #[test]
    fn test_any_to_cell_floats() {
        assert_eq!(any_to_cell(AnyValue::Float64(1.5)), Cell::Float(1.5));
        assert_eq!(any_to_cell(AnyValue::Float32(0.5)), Cell::Float(0.5));
        assert_eq!(any_to_cell(AnyValue::Float64(f64::NAN)), Cell::Null);
    }

    #[test]
    fn test_any_to_cell_boolean() {
        assert_eq!(any_to_cell(AnyValue::Boolean(true)), Cell::Bool(true));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(-0.25), "-0.25");
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64("2.75"), Some(2.75));
        assert_eq!(parse_f64("  2.75  "), Some(2.75));
        assert_eq!(parse_f64("-4"), Some(-4.0));
        assert_eq!(parse_f64("nan"), None);
        assert_eq!(parse_f64("invalid"), None);
    }
}
