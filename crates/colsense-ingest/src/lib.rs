//! File loading for column classification.
//!
//! - **CSV**: read into Polars DataFrames
//! - **JSON**: read into a [`Dataset`](colsense_core::Dataset)
//! - **Configuration**: JSON or TOML, chosen by file extension
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use colsense_ingest::{load_configuration, load_input};
//!
//! let input = load_input(Path::new("walls.csv"))?;
//! let config = load_configuration(Path::new("colsense.toml"))?;
//! ```

mod config;
mod csv;
mod error;
mod input;
mod json;

// === Error Types ===
pub use error::{IngestError, Result};

// === Input Files ===
pub use csv::{MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_frame, validate_encoding};
pub use input::{InputData, load_input};
pub use json::{read_json_dataset, read_json_value};

// === Configuration Files ===
pub use config::{ConfigFormat, load_configuration, render_configuration, write_configuration};
