use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    #[error("unknown unit type: {0}")]
    UnknownUnitType(String),
    #[error("unknown data type: {0}")]
    UnknownDataType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
