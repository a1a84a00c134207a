//! JSON input loading.

use std::path::Path;

use colsense_core::Dataset;
use serde_json::Value;

use crate::error::{IngestError, Result, read_error};

/// Reads a JSON document from disk.
pub fn read_json_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    serde_json::from_str(&content).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Reads a JSON file holding an object of columns, an array of objects or
/// an array of arrays.
pub fn read_json_dataset(path: &Path) -> Result<Dataset> {
    let value = read_json_value(path)?;
    let dataset = Dataset::from_json(value).map_err(|source| IngestError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = dataset.len(), "Loaded JSON");
    Ok(dataset)
}
