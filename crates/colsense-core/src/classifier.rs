//! Classifiers: named, prioritized strategies producing a scored guess of
//! data type and unit for one column.

use std::fmt;

use colsense_common::CellKind;
use colsense_model::catalog;
use colsense_model::{ClassifierSpec, DataType, DataTypeUnit, Unit};

use crate::column::Column;
use crate::error::{ClassifyError, ConfigError};
use crate::extractor::UnitExtractor;
use crate::inference::TypeInference;
use crate::patterns::{ARCHITECTURAL_PATTERNS, GENERAL_PATTERNS, PatternMatch};

const PATTERN_WEIGHT: f64 = 0.6;
const PLACEHOLDER_UNIT_WEIGHT: f64 = 0.2;
const CONCRETE_UNIT_WEIGHT: f64 = 0.3;
const COMPLETENESS_WEIGHT: f64 = 0.1;
const TYPE_CONSISTENCY_WEIGHT: f64 = 0.5;
const UNKNOWN_TYPE_PENALTY: f64 = 0.2;

/// The closed set of classifier variants.
#[derive(Debug, Clone)]
pub enum ClassifierKind {
    /// No patterns; unit extractor and type inference only.
    Default,
    /// Cross-domain keyword patterns.
    General,
    /// Building and BIM patterns.
    Architectural,
    /// Patterns supplied by configuration.
    Configurable(Vec<PatternMatch>),
}

impl ClassifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::Default => "Default",
            ClassifierKind::General => "General",
            ClassifierKind::Architectural => "Architectural",
            ClassifierKind::Configurable(_) => "Configurable",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named classifier with a priority (higher runs first) and the name
/// patterns of its kind.
#[derive(Debug, Clone)]
pub struct Classifier {
    name: String,
    priority: i64,
    kind: ClassifierKind,
    patterns: Vec<PatternMatch>,
}

impl Classifier {
    /// Creates a built-in classifier named after its kind.
    ///
    /// Patterns are installed by [`setup_patterns`](Self::setup_patterns),
    /// which registration calls.
    pub fn new(kind: ClassifierKind, priority: i64) -> Self {
        Self {
            name: kind.as_str().to_string(),
            priority,
            kind,
            patterns: Vec::new(),
        }
    }

    pub fn general(priority: i64) -> Self {
        Self::new(ClassifierKind::General, priority)
    }

    pub fn architectural(priority: i64) -> Self {
        Self::new(ClassifierKind::Architectural, priority)
    }

    /// The pattern-less classifier at priority 0.
    pub fn fallback() -> Self {
        Self::new(ClassifierKind::Default, 0)
    }

    /// Builds a classifier from configuration.
    ///
    /// Fails on an empty name, a zero priority, an invalid regex or a unit
    /// the catalog cannot resolve.
    pub fn configurable(spec: &ClassifierSpec) -> Result<Self, ConfigError> {
        if spec.name.trim().is_empty() {
            return Err(ConfigError::MissingName);
        }
        if spec.priority == 0 {
            return Err(ConfigError::MissingPriority(spec.name.clone()));
        }
        let patterns = spec
            .patterns
            .iter()
            .map(PatternMatch::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: spec.name.clone(),
            priority: spec.priority,
            kind: ClassifierKind::Configurable(patterns),
            patterns: Vec::new(),
        })
    }

    /// Installs the pattern table of this classifier's kind.
    pub fn setup_patterns(&mut self) {
        self.patterns = match &self.kind {
            ClassifierKind::Default => Vec::new(),
            ClassifierKind::General => GENERAL_PATTERNS.clone(),
            ClassifierKind::Architectural => ARCHITECTURAL_PATTERNS.clone(),
            ClassifierKind::Configurable(patterns) => patterns.clone(),
        };
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn kind(&self) -> &ClassifierKind {
        &self.kind
    }

    pub fn patterns(&self) -> &[PatternMatch] {
        &self.patterns
    }

    pub fn to_spec(&self) -> ClassifierSpec {
        ClassifierSpec {
            name: self.name.clone(),
            priority: self.priority,
            patterns: self.patterns.iter().map(PatternMatch::to_spec).collect(),
        }
    }

    /// Classifies one column.
    ///
    /// Fails only when the unit suggested by the name and the unit of the
    /// first matching pattern cannot be reconciled.
    pub fn classify_series(
        &self,
        column: &Column,
        extractor: &mut UnitExtractor,
        inference: &mut TypeInference,
    ) -> Result<DataTypeUnit, ClassifyError> {
        let name_lower = column.name().to_lowercase();

        let extracted = extractor.extract_unit(&name_lower);
        let from_pattern = self
            .first_match(&name_lower)
            .map_or(catalog::UNKNOWN, PatternMatch::unit);
        let mut unit = reconcile_units(column.name(), extracted, from_pattern)?;

        let data_type = inference.infer_type(column);
        if unit.is_unknown() && data_type != DataType::Unknown {
            unit = catalog::NONE;
        }

        let null_count = column.null_count();
        let total_values = column.non_null_count();
        let non_convertible_count = if data_type.is_numeric() {
            column.non_null().filter(|cell| cell.to_f64().is_none()).count()
        } else {
            0
        };

        let confidence = self.confidence(&name_lower, column, data_type, unit, inference);

        Ok(DataTypeUnit {
            data_type,
            unit,
            confidence,
            classifier_name: self.name.clone(),
            total_values,
            null_count,
            non_convertible_count,
        })
    }

    fn first_match(&self, name: &str) -> Option<&PatternMatch> {
        self.patterns.iter().find(|pattern| pattern.is_match(name))
    }

    fn confidence(
        &self,
        name_lower: &str,
        column: &Column,
        data_type: DataType,
        unit: Unit,
        inference: &mut TypeInference,
    ) -> f64 {
        let mut confidence = 0.0;

        if self.first_match(name_lower).is_some() {
            confidence += PATTERN_WEIGHT;
        }

        if unit.is_placeholder() {
            confidence += PLACEHOLDER_UNIT_WEIGHT;
        } else if !unit.is_unknown() {
            confidence += CONCRETE_UNIT_WEIGHT;
        }

        // Empty columns earn no completeness.
        if !column.is_empty() {
            let null_ratio = column.null_count() as f64 / column.len() as f64;
            confidence += COMPLETENESS_WEIGHT * (1.0 - null_ratio);
        }

        let kinds = inference.unique_kinds(column);
        let expected_kind = match data_type {
            DataType::String => Some(CellKind::Str),
            DataType::Integer => Some(CellKind::Int),
            DataType::Float => Some(CellKind::Float),
            DataType::Boolean | DataType::Unknown => None,
        };
        if let Some(kind) = expected_kind
            && kinds.contains(&kind)
        {
            confidence += TYPE_CONSISTENCY_WEIGHT / kinds.len() as f64;
        }

        if data_type == DataType::Unknown {
            confidence -= UNKNOWN_TYPE_PENALTY;
        }

        confidence.clamp(0.0, 1.0)
    }
}

/// Reconciles the unit suggested by the column name with the unit of the
/// first matching pattern.
///
/// | extracted / pattern                         | result                |
/// |---------------------------------------------|-----------------------|
/// | equal                                       | either                |
/// | only one convertable                        | the convertable one   |
/// | both convertable, different unit types      | `MismatchedUnitTypes` |
/// | both convertable, one placeholder           | the concrete one      |
/// | both convertable, both concrete             | `AmbiguousUnits`      |
/// | neither convertable, both unitless          | `ConflictingNoneUnits`|
/// | neither convertable, one unitless           | the unitless one      |
/// | neither convertable, one unknown            | the other one         |
/// | otherwise                                   | unknown               |
pub fn reconcile_units(column: &str, extracted: Unit, pattern: Unit) -> Result<Unit, ClassifyError> {
    if extracted == pattern {
        return Ok(extracted);
    }

    match (extracted.is_convertable(), pattern.is_convertable()) {
        (true, false) => Ok(extracted),
        (false, true) => Ok(pattern),
        (true, true) => {
            if extracted.unit_type != pattern.unit_type {
                return Err(ClassifyError::MismatchedUnitTypes {
                    column: column.to_string(),
                    extracted,
                    pattern,
                });
            }
            match (extracted.is_placeholder(), pattern.is_placeholder()) {
                (true, false) => Ok(pattern),
                (false, true) => Ok(extracted),
                // Same type, both placeholders: already equal above.
                (true, true) => Ok(extracted),
                (false, false) => Err(ClassifyError::AmbiguousUnits {
                    column: column.to_string(),
                    extracted,
                    pattern,
                }),
            }
        }
        (false, false) => match (extracted.is_none_type(), pattern.is_none_type()) {
            (true, true) => Err(ClassifyError::ConflictingNoneUnits {
                column: column.to_string(),
            }),
            (true, false) => Ok(extracted),
            (false, true) => Ok(pattern),
            (false, false) => match (extracted.is_unknown(), pattern.is_unknown()) {
                (true, false) => Ok(pattern),
                (false, true) => Ok(extracted),
                _ => Ok(catalog::UNKNOWN),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colsense_common::Cell;
    use colsense_model::{PatternSpec, UnitType};

    fn setup(kind: ClassifierKind, priority: i64) -> Classifier {
        let mut classifier = Classifier::new(kind, priority);
        classifier.setup_patterns();
        classifier
    }

    fn classify(classifier: &Classifier, column: &Column) -> DataTypeUnit {
        classifier
            .classify_series(column, &mut UnitExtractor::new(), &mut TypeInference::default())
            .unwrap()
    }

    #[test]
    fn test_reconcile_equal_and_single_convertable() {
        let mm = catalog::MILLIMETER;
        assert_eq!(reconcile_units("c", mm, mm).unwrap(), mm);
        assert_eq!(reconcile_units("c", mm, catalog::UNKNOWN).unwrap(), mm);
        assert_eq!(reconcile_units("c", catalog::NONE, mm).unwrap(), mm);
    }

    #[test]
    fn test_reconcile_placeholder_yields_to_concrete() {
        let length = Unit::placeholder(UnitType::Length);
        assert_eq!(reconcile_units("c", length, catalog::METER).unwrap(), catalog::METER);
        assert_eq!(reconcile_units("c", catalog::METER, length).unwrap(), catalog::METER);
    }

    #[test]
    fn test_reconcile_errors() {
        let err = reconcile_units("span", catalog::CENTIMETER, catalog::MILLIMETER).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::AmbiguousUnits {
                column: "span".to_string(),
                extracted: catalog::CENTIMETER,
                pattern: catalog::MILLIMETER,
            }
        );
        assert!(matches!(
            reconcile_units("c", catalog::KILOGRAM, catalog::METER).unwrap_err(),
            ClassifyError::MismatchedUnitTypes { .. }
        ));
        assert!(matches!(
            reconcile_units("c", catalog::NONE, Unit::placeholder(UnitType::None)).unwrap_err(),
            ClassifyError::ConflictingNoneUnits { .. }
        ));
    }

    #[test]
    fn test_reconcile_non_convertable() {
        assert_eq!(reconcile_units("c", catalog::UNKNOWN, catalog::NONE).unwrap(), catalog::NONE);
        assert_eq!(reconcile_units("c", catalog::PIECE, catalog::UNKNOWN).unwrap(), catalog::PIECE);
        assert_eq!(
            reconcile_units("c", Unit::placeholder(UnitType::Quantity), catalog::PIECE).unwrap(),
            catalog::UNKNOWN
        );
    }

    #[test]
    fn test_default_classifier_uses_extractor_only() {
        let classifier = setup(ClassifierKind::Default, 0);
        let result = classify(&classifier, &Column::from_values("length_mm", [100i64, 200, 150]));
        assert_eq!(result.data_type, DataType::Integer);
        assert_eq!(result.unit, catalog::MILLIMETER);
        assert_eq!(result.classifier_name, "Default");
        assert!((result.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_general_boolean_pattern() {
        let classifier = setup(ClassifierKind::General, 1);
        let result = classify(&classifier, &Column::from_values("is_active", ["yes", "no", "yes"]));
        assert_eq!(result.data_type, DataType::Boolean);
        assert_eq!(result.unit, catalog::NONE);
        assert!((result.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_architectural_pattern_unit_beats_context_placeholder() {
        let classifier = setup(ClassifierKind::Architectural, 2);
        let result = classify(&classifier, &Column::from_values("thickness", [100.0, 200.0, 150.0]));
        assert_eq!(result.data_type, DataType::Float);
        assert_eq!(result.unit, catalog::MILLIMETER);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_ambiguous_units_are_reported() {
        // suffix says cm, pattern says mm
        let classifier = setup(ClassifierKind::Architectural, 2);
        let err = classifier
            .classify_series(
                &Column::from_values("thickness_cm", [1.0]),
                &mut UnitExtractor::new(),
                &mut TypeInference::default(),
            )
            .unwrap_err();
        assert!(matches!(err, ClassifyError::AmbiguousUnits { .. }));
        assert_eq!(err.column(), "thickness_cm");
    }

    #[test]
    fn test_quality_counters() {
        let classifier = setup(ClassifierKind::Default, 0);
        let column = Column::from_values("mixed", [Some("1"), Some("2"), Some("text"), None, Some("4")]);
        let result = classifier
            .classify_series(
                &column,
                &mut UnitExtractor::new(),
                &mut TypeInference::default().with_numeric_threshold(0.7),
            )
            .unwrap();
        assert_eq!(result.data_type, DataType::Integer);
        assert_eq!(result.total_values, 4);
        assert_eq!(result.null_count, 1);
        assert_eq!(result.non_convertible_count, 1);
        assert!((result.convertible_percentage() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_data_penalized_and_clamped() {
        let classifier = setup(ClassifierKind::Default, 0);
        let all_null = Column::new("notes", vec![Cell::Null, Cell::Null]);
        let result = classify(&classifier, &all_null);
        assert_eq!(result.data_type, DataType::Unknown);
        assert_eq!(result.unit, catalog::UNKNOWN);
        assert_eq!(result.confidence, 0.0);

        let empty = Column::new("notes", vec![]);
        assert_eq!(classify(&classifier, &empty).confidence, 0.0);
    }

    #[test]
    fn test_configurable_validation() {
        let spec = ClassifierSpec {
            name: String::new(),
            priority: 3,
            patterns: vec![],
        };
        assert_eq!(Classifier::configurable(&spec).unwrap_err(), ConfigError::MissingName);

        let spec = ClassifierSpec {
            name: "HVAC".to_string(),
            priority: 0,
            patterns: vec![],
        };
        assert_eq!(
            Classifier::configurable(&spec).unwrap_err(),
            ConfigError::MissingPriority("HVAC".to_string())
        );
    }

    #[test]
    fn test_configurable_patterns_installed_on_setup() {
        let spec = ClassifierSpec {
            name: "HVAC".to_string(),
            priority: 5,
            patterns: vec![PatternSpec::new(".*airflow.*", "float").with_unit("flow_rate (m³/h)")],
        };
        let mut classifier = Classifier::configurable(&spec).unwrap();
        assert!(classifier.patterns().is_empty());
        classifier.setup_patterns();
        assert_eq!(classifier.patterns().len(), 1);
        assert_eq!(classifier.to_spec(), spec);

        let result = classify(&classifier, &Column::from_values("Airflow", [120.5, 98.0]));
        assert_eq!(result.unit, catalog::CUBIC_METER_PER_HOUR);
        assert_eq!(result.classifier_name, "HVAC");
    }
}
