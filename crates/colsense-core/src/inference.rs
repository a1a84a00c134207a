//! Data type inference from column values.

use std::collections::{BTreeSet, HashMap, HashSet};

use colsense_common::{Cell, CellKind};
use colsense_model::DataType;

use crate::column::Column;

/// Text values read as booleans after trimming and lowercasing.
pub const DEFAULT_BOOLEAN_VALUES: [&str; 18] = [
    "true",
    "false",
    "yes",
    "no",
    "ja",
    "nein",
    "1",
    "0",
    "on",
    "off",
    "enabled",
    "disabled",
    "aktiv",
    "inaktiv",
    "checked",
    "unchecked",
    "selected",
    "unselected",
];

/// Minimum share of non-null values that must parse as numbers.
pub const DEFAULT_NUMERIC_THRESHOLD: f64 = 0.9;

/// Infers the logical data type of a column from its values.
///
/// Checks run boolean, then numeric, then text. Results are cached per
/// column name until [`clear_cache`](Self::clear_cache).
#[derive(Debug, Clone)]
pub struct TypeInference {
    boolean_values: HashSet<String>,
    numeric_threshold: f64,
    data_type_cache: HashMap<String, DataType>,
    kinds_cache: HashMap<String, BTreeSet<CellKind>>,
}

impl Default for TypeInference {
    fn default() -> Self {
        Self::new(DEFAULT_BOOLEAN_VALUES, DEFAULT_NUMERIC_THRESHOLD)
    }
}

impl TypeInference {
    /// Creates an inference with a custom boolean vocabulary.
    ///
    /// An empty vocabulary falls back to [`DEFAULT_BOOLEAN_VALUES`].
    pub fn new<I, S>(boolean_values: I, numeric_threshold: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values: HashSet<String> = boolean_values
            .into_iter()
            .map(|value| value.as_ref().trim().to_lowercase())
            .collect();
        if values.is_empty() {
            values = DEFAULT_BOOLEAN_VALUES
                .iter()
                .map(|value| (*value).to_string())
                .collect();
        }
        Self {
            boolean_values: values,
            numeric_threshold,
            data_type_cache: HashMap::new(),
            kinds_cache: HashMap::new(),
        }
    }

    pub fn with_numeric_threshold(mut self, numeric_threshold: f64) -> Self {
        self.numeric_threshold = numeric_threshold;
        self.clear_cache();
        self
    }

    pub fn numeric_threshold(&self) -> f64 {
        self.numeric_threshold
    }

    pub fn boolean_values(&self) -> &HashSet<String> {
        &self.boolean_values
    }

    pub fn clear_cache(&mut self) {
        self.data_type_cache.clear();
        self.kinds_cache.clear();
    }

    /// Infers the data type of a column. Empty and all-null columns are
    /// `Unknown`.
    pub fn infer_type(&mut self, column: &Column) -> DataType {
        if let Some(data_type) = self.data_type_cache.get(column.name()) {
            return *data_type;
        }
        let data_type = self.detect(column);
        self.data_type_cache
            .insert(column.name().to_string(), data_type);
        data_type
    }

    /// Distinct storage kinds of the non-null values.
    ///
    /// Columns already recognized as boolean report a single boolean kind,
    /// whatever their storage.
    pub fn unique_kinds(&mut self, column: &Column) -> BTreeSet<CellKind> {
        self.kinds_cache
            .entry(column.name().to_string())
            .or_insert_with(|| column.kinds())
            .clone()
    }

    /// True if every non-null value is in the boolean vocabulary.
    pub fn is_boolean_column(&self, column: &Column) -> bool {
        column.non_null().all(|cell| {
            cell.boolean_text()
                .is_some_and(|text| self.boolean_values.contains(&text))
        })
    }

    fn detect(&mut self, column: &Column) -> DataType {
        let non_null = column.non_null_count();
        if non_null == 0 {
            return DataType::Unknown;
        }

        if self.is_boolean_column(column) {
            self.kinds_cache
                .insert(column.name().to_string(), BTreeSet::from([CellKind::Bool]));
            return DataType::Boolean;
        }

        let numbers: Vec<f64> = column.non_null().filter_map(Cell::to_f64).collect();
        let success_ratio = numbers.len() as f64 / non_null as f64;
        if success_ratio >= self.numeric_threshold && !numbers.is_empty() {
            let has_nulls = column.null_count() > 0;
            let all_integers = numbers.iter().all(|value| value % 1.0 == 0.0);
            return if (!has_nulls && column.is_float_storage()) || !all_integers {
                DataType::Float
            } else {
                DataType::Integer
            };
        }

        let kinds = column.kinds();
        if kinds.len() == 1 && kinds.contains(&CellKind::Str) {
            DataType::String
        } else {
            DataType::Unknown
        }
    }
}
