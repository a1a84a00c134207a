//! Column-level semantic inference.
//!
//! For each column of unlabeled tabular data the engine determines:
//!
//! - **Data type**: string, integer, float or boolean, from the values
//! - **Unit**: the physical measurement unit, from the column name
//! - **Confidence**: how well name patterns, units and values agree
//!
//! # Example
//!
//! ```
//! use colsense_core::{AnalyzeOptions, Engine};
//! use colsense_model::DataType;
//! use serde_json::json;
//!
//! let mut engine = Engine::new();
//! let analysis = engine
//!     .analyze_json(json!({"length_mm": [100, 200, 150]}), &AnalyzeOptions::default())
//!     .unwrap();
//! let result = analysis.get("length_mm").unwrap();
//! assert_eq!(result.data_type, DataType::Integer);
//! assert_eq!(result.unit.symbol, "mm");
//! ```

pub mod analysis;
pub mod classifier;
pub mod column;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod inference;
pub mod patterns;
pub mod registry;

pub use analysis::Analysis;
pub use classifier::{Classifier, ClassifierKind, reconcile_units};
pub use column::{Column, ColumnTable};
pub use dataset::{Dataset, Record};
pub use engine::{AnalyzeOptions, Engine, EngineOptions, NO_CLASSIFIER, Strategy};
pub use error::{ClassifyError, ConfigError, EngineError, InputError, Result};
pub use extractor::UnitExtractor;
pub use inference::{DEFAULT_BOOLEAN_VALUES, DEFAULT_NUMERIC_THRESHOLD, TypeInference};
pub use patterns::PatternMatch;
pub use registry::ClassifierRegistry;
