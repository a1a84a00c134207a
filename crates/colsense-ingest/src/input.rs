//! Input file dispatch by extension.

use std::path::Path;

use colsense_core::Dataset;
use polars::prelude::DataFrame;

use crate::csv::read_csv_frame;
use crate::error::{IngestError, Result};
use crate::json::read_json_dataset;

/// Loaded input data, ready for analysis.
#[derive(Debug, Clone)]
pub enum InputData {
    /// CSV data read by Polars.
    Frame(DataFrame),
    /// JSON data in one of the supported shapes.
    Json(Dataset),
}

impl InputData {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            InputData::Frame(df) => df.height(),
            InputData::Json(dataset) => dataset.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads a `.csv` or `.json` file.
pub fn load_input(path: &Path) -> Result<InputData> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_lowercase();
    match extension.as_str() {
        "csv" => read_csv_frame(path).map(InputData::Frame),
        "json" => read_json_dataset(path).map(InputData::Json),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}
