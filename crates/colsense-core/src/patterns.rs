//! Column name patterns and the built-in pattern tables.

use std::sync::LazyLock;

use colsense_model::catalog::{self, unit_by_display_name};
use colsense_model::{DataType, PatternSpec, Unit, UnitType};
use regex::{Regex, RegexBuilder};

use crate::error::ConfigError;

/// A case-insensitive name pattern with the data type and unit it implies.
#[derive(Debug, Clone)]
pub struct PatternMatch {
    pattern: String,
    regex: Regex,
    data_type: DataType,
    unit: Unit,
}

impl PatternMatch {
    /// Compiles a unitless pattern.
    pub fn new(pattern: &str, data_type: DataType) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            data_type,
            unit: catalog::NONE,
        })
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Targets the placeholder of `unit_type` unless a unit is already set.
    pub fn with_unit_type(mut self, unit_type: UnitType) -> Self {
        if self.unit == catalog::NONE && !unit_type.is_sentinel() {
            self.unit = Unit::placeholder(unit_type);
        }
        self
    }

    /// Builds a pattern from configuration. A missing unit means unitless.
    pub fn from_spec(spec: &PatternSpec) -> Result<Self, ConfigError> {
        let unit_name = spec.unit.as_deref().unwrap_or("none");
        let unit = unit_by_display_name(unit_name).map_err(|_| ConfigError::UnknownUnit {
            pattern: spec.pattern.clone(),
            unit: unit_name.to_string(),
        })?;
        let data_type = DataType::from_name(Some(spec.data_type.as_str()));
        Ok(Self::new(&spec.pattern, data_type)?.with_unit(unit))
    }

    /// Configuration form. Units that do not convert are left out.
    pub fn to_spec(&self) -> PatternSpec {
        let spec = PatternSpec::new(self.pattern.as_str(), self.data_type.as_str());
        if self.unit.is_convertable() {
            spec.with_unit(self.unit.display_name())
        } else {
            spec
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }
}

fn pattern(pattern: &str, data_type: DataType) -> PatternMatch {
    PatternMatch::new(pattern, data_type).expect("Invalid built-in pattern")
}

/// Cross-domain keywords: flags, dimensions, area, volume, mass, counts.
pub(crate) static GENERAL_PATTERNS: LazyLock<Vec<PatternMatch>> = LazyLock::new(|| {
    vec![
        pattern(r".*(?:boolean|bool|boolesche).*", DataType::Boolean),
        pattern(r".*(?:aktiv|active|enabled|on).*", DataType::Boolean),
        pattern(r".*(?:inaktiv|inactive|disabled|off).*", DataType::Boolean),
        pattern(r".*(?:sichtbar|visible|shown).*", DataType::Boolean),
        pattern(r".*(?:verfügbar|available).*", DataType::Boolean),
        pattern(r".*(?:ist.*|hat.*|besitzt.*)", DataType::Boolean),
        pattern(r".*(?:length|länge|abstand).*", DataType::Float).with_unit_type(UnitType::Length),
        pattern(r".*(?:width|breite).*", DataType::Float).with_unit_type(UnitType::Length),
        pattern(r".*(?:depth|tiefe).*", DataType::Float).with_unit_type(UnitType::Length),
        pattern(r".*(?:height|höhe).*", DataType::Float).with_unit_type(UnitType::Length),
        pattern(r".*(?:diameter|durchmesser).*", DataType::Float).with_unit_type(UnitType::Length),
        pattern(r".*(?:thickness|dicke).*", DataType::Float).with_unit_type(UnitType::Length),
        pattern(r".*(?:area|fläche).*", DataType::Float).with_unit_type(UnitType::Area),
        pattern(r".*(?:volume|volumen).*", DataType::Float).with_unit_type(UnitType::Volume),
        pattern(r".*(?:weight|gewicht|mass|masse).*", DataType::Float)
            .with_unit_type(UnitType::Mass),
        pattern(r".*(?:count|anzahl|quantity|menge).*", DataType::Integer)
            .with_unit(catalog::PIECE),
    ]
});

/// Building and BIM vocabulary.
pub(crate) static ARCHITECTURAL_PATTERNS: LazyLock<Vec<PatternMatch>> = LazyLock::new(|| {
    vec![
        pattern(r".*phase.*", DataType::String),
        pattern(r".*thickness.*", DataType::Float).with_unit(catalog::MILLIMETER),
        pattern(r".*elevation.*", DataType::Float).with_unit(catalog::METER),
        pattern(r".*m\.ü\.m.*", DataType::Float).with_unit(catalog::METER),
        pattern(r".*altitude.*", DataType::Float).with_unit(catalog::METER),
        pattern(r".*material.*", DataType::String),
        pattern(r".*(?:structural|tragend).*", DataType::Boolean),
        pattern(r".*(?:load.*bearing|lastentragend).*", DataType::Boolean),
        pattern(r".*(?:fire.*rated|feuerschutz).*", DataType::Boolean),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_type_targets_placeholder() {
        let p = pattern(".*width.*", DataType::Float).with_unit_type(UnitType::Length);
        assert_eq!(p.unit(), Unit::placeholder(UnitType::Length));

        let p = pattern(".*count.*", DataType::Integer)
            .with_unit(catalog::PIECE)
            .with_unit_type(UnitType::Quantity);
        assert_eq!(p.unit(), catalog::PIECE);

        let p = pattern(".*flag.*", DataType::Boolean).with_unit_type(UnitType::Unknown);
        assert_eq!(p.unit(), catalog::NONE);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let p = pattern(r".*(?:height|höhe).*", DataType::Float);
        assert!(p.is_match("Wall HEIGHT"));
        assert!(p.is_match("raumhöhe"));
        assert!(!p.is_match("width"));
    }

    #[test]
    fn test_from_spec() {
        let spec = PatternSpec::new(".*airflow.*", "float").with_unit("flow_rate (m³/h)");
        let p = PatternMatch::from_spec(&spec).unwrap();
        assert_eq!(p.data_type(), DataType::Float);
        assert_eq!(p.unit(), catalog::CUBIC_METER_PER_HOUR);

        let p = PatternMatch::from_spec(&PatternSpec::new(".*zone.*", "text")).unwrap();
        assert_eq!(p.data_type(), DataType::Unknown);
        assert_eq!(p.unit(), catalog::NONE);
    }

    #[test]
    fn test_from_spec_errors() {
        let spec = PatternSpec::new(".*x.*", "float").with_unit("length (furlong)");
        assert_eq!(
            PatternMatch::from_spec(&spec).unwrap_err(),
            ConfigError::UnknownUnit {
                pattern: ".*x.*".to_string(),
                unit: "length (furlong)".to_string()
            }
        );
        let spec = PatternSpec::new("(unclosed", "string");
        assert!(matches!(
            PatternMatch::from_spec(&spec).unwrap_err(),
            ConfigError::InvalidPattern { .. }
        ));
    }

    #[test]
    fn test_to_spec_omits_non_convertable_units() {
        let p = pattern(".*count.*", DataType::Integer).with_unit(catalog::PIECE);
        assert_eq!(p.to_spec().unit, None);
        let p = pattern(".*thickness.*", DataType::Float).with_unit(catalog::MILLIMETER);
        assert_eq!(p.to_spec().unit.as_deref(), Some("length (mm)"));
        let p = pattern(".*width.*", DataType::Float).with_unit_type(UnitType::Length);
        assert_eq!(p.to_spec().unit.as_deref(), Some("length (~)"));
    }

    #[test]
    fn test_built_in_tables_compile() {
        assert_eq!(GENERAL_PATTERNS.len(), 16);
        assert_eq!(ARCHITECTURAL_PATTERNS.len(), 9);
    }
}
