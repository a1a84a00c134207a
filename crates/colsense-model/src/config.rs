//! Configuration records exchanged with config files.
//!
//! Units are referenced by display string (`"length (mm)"`, `"none"`,
//! `"mass (~)"`) and unit types by canonical name, so a file stays readable
//! without knowing the catalog's Rust names.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One name pattern of a configured classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Case-insensitive regular expression matched against the column name.
    pub pattern: String,
    /// Canonical data type name; unrecognized names read as `unknown`.
    #[serde(default)]
    pub data_type: String,
    /// Unit display string. Omitted for unitless patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl PatternSpec {
    pub fn new(pattern: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            data_type: data_type.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// A classifier as described in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassifierSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub patterns: Vec<PatternSpec>,
}

/// Extractor mappings and classifiers loaded from or exported to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Keep the built-in mappings and classifiers and add to them.
    #[serde(default = "default_merge")]
    pub merge_with_default: bool,
    /// Token to unit display string.
    #[serde(default)]
    pub direct_mappings: IndexMap<String, String>,
    /// Name substring to unit type name. File order is kept: the first
    /// keyword contained in a column name wins.
    #[serde(default)]
    pub context_mappings: IndexMap<String, String>,
    #[serde(default)]
    pub classifiers: IndexMap<String, ClassifierSpec>,
}

fn default_merge() -> bool {
    true
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            merge_with_default: true,
            direct_mappings: IndexMap::new(),
            context_mappings: IndexMap::new(),
            classifiers: IndexMap::new(),
        }
    }
}

impl Configuration {
    pub fn is_empty(&self) -> bool {
        self.direct_mappings.is_empty()
            && self.context_mappings.is_empty()
            && self.classifiers.is_empty()
    }
}
