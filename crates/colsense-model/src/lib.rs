//! Data model for column classification: units, data types, results and
//! configuration records.

pub mod catalog;
pub mod config;
pub mod enums;
pub mod error;
pub mod result;
pub mod unit;

pub use config::{ClassifierSpec, Configuration, PatternSpec};
pub use enums::{DataType, UnitType};
pub use error::{ModelError, Result};
pub use result::DataTypeUnit;
pub use unit::{PLACEHOLDER_SYMBOL, Unit};
