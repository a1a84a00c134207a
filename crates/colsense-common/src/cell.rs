//! Dynamically typed cell values.
//!
//! Input arrives from JSON documents, Polars frames or plain Rust values.
//! All of them are reduced to [`Cell`] before classification so the core
//! sees one value model regardless of source.

use std::fmt;

use serde_json::Value;

use crate::polars::{format_numeric, parse_f64};

/// A single value of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Underlying storage kind of a non-null cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    Bool,
    Int,
    Float,
    Str,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Bool => "bool",
            CellKind::Int => "int",
            CellKind::Float => "float",
            CellKind::Str => "str",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Cell {
    /// Converts a JSON value. Nested arrays and objects keep their JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Cell::Int(i)
                } else {
                    n.as_f64().map_or(Cell::Null, Cell::from)
                }
            }
            Value::String(s) => Cell::Str(s.clone()),
            other => Cell::Str(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Storage kind, `None` for nulls.
    pub fn kind(&self) -> Option<CellKind> {
        match self {
            Cell::Null => None,
            Cell::Bool(_) => Some(CellKind::Bool),
            Cell::Int(_) => Some(CellKind::Int),
            Cell::Float(_) => Some(CellKind::Float),
            Cell::Str(_) => Some(CellKind::Str),
        }
    }

    /// Numeric coercion: numbers as-is, booleans as 1/0, text parsed after
    /// trimming. Nulls and unparsable text yield `None`.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Cell::Null => None,
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(v) => Some(*v),
            Cell::Str(s) => parse_f64(s),
        }
    }

    /// Normalized text used for boolean vocabulary lookups.
    pub fn boolean_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(v) => Some(format!("{v:?}")),
            Cell::Str(s) => Some(s.trim().to_lowercase()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => f.write_str(&format_numeric(*v)),
            Cell::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(i64::from(value))
    }
}

/// NaN is treated as a missing value.
impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Cell::Null
        } else {
            Cell::Float(value)
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Str(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Str(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        assert_eq!(Cell::from_json(&json!(null)), Cell::Null);
        assert_eq!(Cell::from_json(&json!(true)), Cell::Bool(true));
        assert_eq!(Cell::from_json(&json!(42)), Cell::Int(42));
        assert_eq!(Cell::from_json(&json!(1.5)), Cell::Float(1.5));
        assert_eq!(Cell::from_json(&json!("x")), Cell::from("x"));
        assert_eq!(Cell::from_json(&json!([1, 2])), Cell::from("[1,2]"));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Cell::from(" 2.5 ").to_f64(), Some(2.5));
        assert_eq!(Cell::from("1e3").to_f64(), Some(1000.0));
        assert_eq!(Cell::from("text").to_f64(), None);
        assert_eq!(Cell::from("NaN").to_f64(), None);
        assert_eq!(Cell::Bool(true).to_f64(), Some(1.0));
        assert_eq!(Cell::Null.to_f64(), None);
    }

    #[test]
    fn test_boolean_text() {
        assert_eq!(Cell::from("  YES ").boolean_text().as_deref(), Some("yes"));
        assert_eq!(Cell::Bool(false).boolean_text().as_deref(), Some("false"));
        assert_eq!(Cell::Int(1).boolean_text().as_deref(), Some("1"));
        assert_eq!(Cell::Float(1.0).boolean_text().as_deref(), Some("1.0"));
        assert_eq!(Cell::Null.boolean_text(), None);
    }

    #[test]
    fn test_nan_and_none_become_null() {
        assert_eq!(Cell::from(f64::NAN), Cell::Null);
        assert_eq!(Cell::from(None::<i64>), Cell::Null);
        assert_eq!(Cell::from(Some("a")), Cell::from("a"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::Float(2.0).to_string(), "2");
        assert_eq!(Cell::Int(-3).to_string(), "-3");
        assert_eq!(Cell::Null.to_string(), "");
    }
}
