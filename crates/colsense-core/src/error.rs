//! Error types for classification.

use colsense_model::Unit;
use thiserror::Error;

/// Failure of one classifier on one column.
///
/// The engine treats these as the classifier abstaining.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ClassifyError {
    /// Two different concrete units of the same type.
    #[error("Ambiguous units for '{column}': name suggests {extracted}, pattern suggests {pattern}")]
    AmbiguousUnits {
        column: String,
        extracted: Unit,
        pattern: Unit,
    },

    /// Two convertable units of different unit types.
    #[error("Mismatched unit types for '{column}': name suggests {extracted}, pattern suggests {pattern}")]
    MismatchedUnitTypes {
        column: String,
        extracted: Unit,
        pattern: Unit,
    },

    /// Two distinct units both claiming the column is unitless.
    #[error("Conflicting unitless units for '{column}'")]
    ConflictingNoneUnits { column: String },
}

impl ClassifyError {
    /// Get the column name associated with this error.
    pub fn column(&self) -> &str {
        match self {
            Self::AmbiguousUnits { column, .. }
            | Self::MismatchedUnitTypes { column, .. }
            | Self::ConflictingNoneUnits { column } => column,
        }
    }
}

/// Invalid classifier configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Classifier name must not be empty")]
    MissingName,

    #[error("Classifier '{0}' must have a non-zero priority")]
    MissingPriority(String),

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Unknown unit '{unit}' in pattern '{pattern}'")]
    UnknownUnit { pattern: String, unit: String },
}

/// Input data that is not one of the supported shapes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("Unsupported data shape: {0}")]
    UnsupportedShape(String),

    #[error("Row {row} is not of the same shape as the first row")]
    MixedRows { row: usize },

    #[error("Column '{column}' has {actual} values, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column '{column}' must be an array of values")]
    NotAnArray { column: String },
}

/// Errors surfaced by the engine's public entry points.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
