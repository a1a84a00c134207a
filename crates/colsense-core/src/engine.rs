//! Classification engine.
//!
//! The engine owns one [`UnitExtractor`], one [`TypeInference`] and a
//! [`ClassifierRegistry`]. For every column it runs the active classifiers
//! in descending priority order and keeps the best qualifying result.

use std::fmt;
use std::time::Instant;

use colsense_model::catalog;
use colsense_model::{Configuration, DataType, DataTypeUnit};
use polars::prelude::DataFrame;
use serde_json::Value;
use tracing::{debug, error, info_span, warn};

use crate::analysis::Analysis;
use crate::classifier::Classifier;
use crate::column::{Column, ColumnTable};
use crate::dataset::{Dataset, RowLayout, split_header_row};
use crate::error::{ConfigError, Result};
use crate::extractor::UnitExtractor;
use crate::inference::TypeInference;
use crate::registry::ClassifierRegistry;

/// Classifier name of the result returned when nothing qualifies.
pub const NO_CLASSIFIER: &str = "NO CLASSIFIER";

const NULL_PERCENTAGE_WARNING: f64 = 50.0;
const LOW_CONFIDENCE_WARNING: f64 = 0.3;

/// Tuning knobs of the engine.
///
/// The row thresholds only decide how row-oriented input is turned into
/// columns. They never change results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// Results below this confidence are discarded (default: 0.6).
    pub min_confidence_threshold: f64,
    /// A result at or above this confidence ends the search (default: 0.9).
    pub early_exit_confidence: f64,
    /// Fewer rows than this are always read directly (default: 100).
    pub small_data_threshold: usize,
    /// More rows than this are always transposed into a table (default: 10000).
    pub large_data_threshold: usize,
    /// Record lists above this size use a table (default: 500).
    pub record_table_threshold: usize,
    /// Row lists above this size use a table (default: 1000).
    pub row_table_threshold: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            min_confidence_threshold: 0.6,
            early_exit_confidence: 0.9,
            small_data_threshold: 100,
            large_data_threshold: 10_000,
            record_table_threshold: 500,
            row_table_threshold: 1_000,
        }
    }
}

impl EngineOptions {
    #[must_use]
    pub fn with_min_confidence(mut self, threshold: f64) -> Self {
        self.min_confidence_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_early_exit_confidence(mut self, confidence: f64) -> Self {
        self.early_exit_confidence = confidence;
        self
    }

    #[must_use]
    pub fn with_data_thresholds(mut self, small: usize, large: usize) -> Self {
        self.small_data_threshold = small;
        self.large_data_threshold = large;
        self
    }

    #[must_use]
    pub fn with_table_thresholds(mut self, records: usize, rows: usize) -> Self {
        self.record_table_threshold = records;
        self.row_table_threshold = rows;
        self
    }

    /// Picks how `row_count` rows of row-oriented input are processed.
    pub fn strategy(&self, row_count: usize, records: bool) -> Strategy {
        if row_count < self.small_data_threshold {
            return Strategy::Direct;
        }
        if row_count > self.large_data_threshold {
            return Strategy::Table;
        }
        let threshold = if records {
            self.record_table_threshold
        } else {
            self.row_table_threshold
        };
        if row_count > threshold {
            Strategy::Table
        } else {
            Strategy::Direct
        }
    }
}

/// How row-oriented input is turned into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Read each column straight from the rows.
    Direct,
    /// Transpose all rows into a cell table in one pass, then classify the
    /// table's columns.
    Table,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Table => "table",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options of [`Engine::analyze`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Column names for row sequences.
    pub headers: Option<Vec<String>>,
    /// Treat the first row sequence as the header row.
    pub contains_headers: bool,
    /// Classifier names to run. `None` or empty runs all of them.
    pub active_classifiers: Option<Vec<String>>,
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_contains_headers(mut self, contains_headers: bool) -> Self {
        self.contains_headers = contains_headers;
        self
    }

    #[must_use]
    pub fn with_active_classifiers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_classifiers = Some(names.into_iter().map(Into::into).collect());
        self
    }

    fn active(&self) -> Option<&[String]> {
        self.active_classifiers.as_deref()
    }
}

/// Top-level classifier orchestration.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: ClassifierRegistry,
    extractor: UnitExtractor,
    inference: TypeInference,
    options: EngineOptions,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the General (1), Architectural (2) and
    /// Default (0) classifiers registered.
    pub fn new() -> Self {
        let mut registry = ClassifierRegistry::new();
        registry.register(Classifier::general(1));
        registry.register(Classifier::architectural(2));
        registry.register(Classifier::fallback());
        Self {
            registry,
            extractor: UnitExtractor::new(),
            inference: TypeInference::default(),
            options: EngineOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_type_inference(mut self, inference: TypeInference) -> Self {
        self.inference = inference;
        self
    }

    #[must_use]
    pub fn with_unit_extractor(mut self, extractor: UnitExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ClassifierRegistry {
        &mut self.registry
    }

    pub fn register(&mut self, classifier: Classifier) {
        self.registry.register(classifier);
    }

    pub fn unit_extractor(&self) -> &UnitExtractor {
        &self.extractor
    }

    pub fn unit_extractor_mut(&mut self) -> &mut UnitExtractor {
        &mut self.extractor
    }

    pub fn type_inference(&self) -> &TypeInference {
        &self.inference
    }

    /// Names of the registered classifiers.
    pub fn classifier_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn clear_cache(&mut self) {
        self.extractor.clear_cache();
        self.inference.clear_cache();
    }

    /// Applies a configuration.
    ///
    /// Without `merge_with_default` the registered classifiers and the unit
    /// mappings are dropped first. A configured classifier whose name is
    /// already registered keeps the registered one. Every configured
    /// classifier is validated before any is registered.
    pub fn load_configuration(&mut self, config: &Configuration) -> std::result::Result<(), ConfigError> {
        let mut configured = Vec::new();
        for (name, spec) in &config.classifiers {
            if config.merge_with_default && self.registry.get(name).is_some() {
                debug!(classifier = %name, "Keeping registered classifier");
                continue;
            }
            configured.push(Classifier::configurable(spec)?);
        }

        if !config.merge_with_default {
            self.registry.clear();
        }
        self.extractor.load_configuration(config);
        for classifier in configured {
            debug!(
                classifier = %classifier.name(),
                priority = classifier.priority(),
                patterns = classifier.patterns().len(),
                "Registering configured classifier"
            );
            self.registry.register(classifier);
        }
        Ok(())
    }

    /// The configuration equivalent of the current engine state: alternate
    /// unit spellings, context keywords and every registered classifier.
    pub fn export_configuration(&self) -> Configuration {
        let direct = self.extractor.direct_mappings();
        let direct_mappings = self
            .extractor
            .manual_mapping_keys()
            .into_iter()
            .filter_map(|key| direct.get(key).map(|unit| (key.to_string(), unit.display_name())))
            .collect();
        let context_mappings = self
            .extractor
            .context_mappings()
            .iter()
            .map(|(key, unit_type)| (key.clone(), unit_type.as_str().to_string()))
            .collect();
        let classifiers = self
            .registry
            .get_classifiers(None, false)
            .into_iter()
            .map(|classifier| (classifier.name().to_lowercase(), classifier.to_spec()))
            .collect();
        Configuration {
            merge_with_default: true,
            direct_mappings,
            context_mappings,
            classifiers,
        }
    }

    /// Classifies every column of `dataset`.
    ///
    /// Caches are cleared first, so results never depend on earlier runs.
    pub fn analyze(&mut self, dataset: &Dataset, options: &AnalyzeOptions) -> Analysis {
        self.clear_cache();
        let span = info_span!("analyze", rows = dataset.len());
        let _guard = span.enter();
        let start = Instant::now();

        let analysis = match dataset {
            Dataset::Table(table) => self.classify_table(table, options.active()),
            Dataset::Records(records) => {
                if records.is_empty() {
                    return Analysis::new();
                }
                self.classify_rows(&RowLayout::records(records), true, options.active())
            }
            Dataset::Rows(rows) => {
                let (headers, rows) = if options.contains_headers {
                    split_header_row(rows)
                } else {
                    (options.headers.clone(), rows.as_slice())
                };
                if rows.is_empty() {
                    return Analysis::new();
                }
                self.classify_rows(&RowLayout::rows(rows, headers), false, options.active())
            }
        };

        debug!(
            columns = analysis.len(),
            duration_ms = start.elapsed().as_millis(),
            "analysis complete"
        );
        analysis
    }

    /// Parses untyped JSON input and classifies it.
    ///
    /// Fails when the document is not an object of columns, an array of
    /// objects or an array of arrays.
    pub fn analyze_json(&mut self, value: Value, options: &AnalyzeOptions) -> Result<Analysis> {
        let dataset = Dataset::from_json(value)?;
        Ok(self.analyze(&dataset, options))
    }

    /// Classifies the columns of a Polars frame.
    pub fn analyze_frame(&mut self, df: &DataFrame, active_classifiers: Option<&[String]>) -> Analysis {
        self.analyze_table(&ColumnTable::from_frame(df), active_classifiers)
    }

    /// Classifies the columns of a table.
    pub fn analyze_table(&mut self, table: &ColumnTable, active_classifiers: Option<&[String]>) -> Analysis {
        self.clear_cache();
        let span = info_span!("analyze", rows = table.height());
        let _guard = span.enter();
        self.classify_table(table, active_classifiers)
    }

    fn classify_table(&mut self, table: &ColumnTable, active: Option<&[String]>) -> Analysis {
        table
            .columns()
            .iter()
            .map(|column| (column.name().to_string(), self.classify(column, active)))
            .collect()
    }

    fn classify_rows(&mut self, layout: &RowLayout<'_>, records: bool, active: Option<&[String]>) -> Analysis {
        let strategy = self.options.strategy(layout.row_count(), records);
        debug!(
            strategy = %strategy,
            rows = layout.row_count(),
            columns = layout.names().len(),
            "selected processing strategy"
        );
        match strategy {
            Strategy::Direct => (0..layout.names().len())
                .map(|idx| {
                    let column = layout.column(idx);
                    let result = self.classify(&column, active);
                    (column.name().to_string(), result)
                })
                .collect(),
            Strategy::Table => self.classify_table(&layout.to_table(), active),
        }
    }

    fn classify(&mut self, column: &Column, active: Option<&[String]>) -> DataTypeUnit {
        let Engine {
            registry,
            extractor,
            inference,
            options,
        } = self;
        let classifiers = registry.get_classifiers(active, true);
        classify_column(column, &classifiers, extractor, inference, options)
    }
}

/// Runs `classifiers` in order and keeps the best qualifying result.
///
/// A classifier that fails on the column abstains. Only a strictly higher
/// confidence replaces the current best, and a qualifying result at or above
/// the early exit confidence ends the search.
fn classify_column(
    column: &Column,
    classifiers: &[&Classifier],
    extractor: &mut UnitExtractor,
    inference: &mut TypeInference,
    options: &EngineOptions,
) -> DataTypeUnit {
    let mut best: Option<DataTypeUnit> = None;

    for classifier in classifiers {
        let result = match classifier.classify_series(column, extractor, inference) {
            Ok(result) => result,
            Err(e) => {
                error!(classifier = %classifier.name(), column = %column.name(), "Classifier failed: {e}");
                continue;
            }
        };
        if result.confidence < options.min_confidence_threshold {
            continue;
        }
        let early_exit = result.confidence >= options.early_exit_confidence;
        if best
            .as_ref()
            .is_none_or(|current| result.confidence > current.confidence)
        {
            best = Some(result);
        }
        if early_exit {
            break;
        }
    }

    let result = best.unwrap_or_else(|| DataTypeUnit {
        data_type: DataType::Unknown,
        unit: catalog::NONE,
        confidence: 0.0,
        classifier_name: NO_CLASSIFIER.to_string(),
        total_values: column.non_null_count(),
        null_count: column.null_count(),
        non_convertible_count: 0,
    });

    debug!(
        column = %column.name(),
        classifier = %result.classifier_name,
        data_type = %result.data_type,
        unit = %result.unit,
        confidence = result.confidence,
        "classified column"
    );
    if result.null_percentage() > NULL_PERCENTAGE_WARNING {
        warn!(
            column = %column.name(),
            "Column has {:.1}% null values",
            result.null_percentage()
        );
    }
    if result.confidence < LOW_CONFIDENCE_WARNING {
        warn!(
            column = %column.name(),
            "Low confidence ({:.2})",
            result.confidence
        );
    }
    result
}
