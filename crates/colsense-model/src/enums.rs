//! Type-safe enumerations for column classification.
//!
//! Both enums round-trip through their canonical lowercase names, which is
//! how they appear in configuration files and exported results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Category of physical quantity a unit measures.
///
/// `None` marks a column that is explicitly unitless, `Unknown` one whose
/// unit could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    None,
    Unknown,
    Length,
    Area,
    Volume,
    Mass,
    Currency,
    Quantity,
    Time,
    Pressure,
    Temperature,
    Voltage,
    Current,
    Power,
    Energy,
    Velocity,
    FlowRate,
    Angle,
    Rotation,
}

impl UnitType {
    /// All unit types in declaration order.
    pub const ALL: [UnitType; 19] = [
        UnitType::None,
        UnitType::Unknown,
        UnitType::Length,
        UnitType::Area,
        UnitType::Volume,
        UnitType::Mass,
        UnitType::Currency,
        UnitType::Quantity,
        UnitType::Time,
        UnitType::Pressure,
        UnitType::Temperature,
        UnitType::Voltage,
        UnitType::Current,
        UnitType::Power,
        UnitType::Energy,
        UnitType::Velocity,
        UnitType::FlowRate,
        UnitType::Angle,
        UnitType::Rotation,
    ];

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::None => "none",
            UnitType::Unknown => "unknown",
            UnitType::Length => "length",
            UnitType::Area => "area",
            UnitType::Volume => "volume",
            UnitType::Mass => "mass",
            UnitType::Currency => "currency",
            UnitType::Quantity => "quantity",
            UnitType::Time => "time",
            UnitType::Pressure => "pressure",
            UnitType::Temperature => "temperature",
            UnitType::Voltage => "voltage",
            UnitType::Current => "current",
            UnitType::Power => "power",
            UnitType::Energy => "energy",
            UnitType::Velocity => "velocity",
            UnitType::FlowRate => "flow_rate",
            UnitType::Angle => "angle",
            UnitType::Rotation => "rotation",
        }
    }

    /// Lenient lookup by canonical name; anything unrecognized is `Unknown`.
    pub fn from_name(name: Option<&str>) -> UnitType {
        name.and_then(|value| value.parse().ok())
            .unwrap_or(UnitType::Unknown)
    }

    /// True for the two sentinels that carry no physical meaning.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, UnitType::None | UnitType::Unknown)
    }

    /// True if values of this type can be converted between units.
    pub fn is_convertable(&self) -> bool {
        !matches!(
            self,
            UnitType::None | UnitType::Unknown | UnitType::Quantity
        )
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitType::ALL
            .into_iter()
            .find(|unit_type| unit_type.as_str() == s)
            .ok_or_else(|| ModelError::UnknownUnitType(s.to_string()))
    }
}

/// Logical kind of the values stored in a column.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Unknown,
    String,
    Integer,
    Float,
    Boolean,
}

impl DataType {
    pub const ALL: [DataType; 5] = [
        DataType::Unknown,
        DataType::String,
        DataType::Integer,
        DataType::Float,
        DataType::Boolean,
    ];

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Unknown => "unknown",
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
        }
    }

    /// Lenient lookup by canonical name; anything unrecognized is `Unknown`.
    pub fn from_name(name: Option<&str>) -> DataType {
        name.and_then(|value| value.parse().ok())
            .unwrap_or(DataType::Unknown)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.as_str() == s)
            .ok_or_else(|| ModelError::UnknownDataType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_type_names_round_trip() {
        for unit_type in UnitType::ALL {
            assert_eq!(unit_type.as_str().parse::<UnitType>().unwrap(), unit_type);
        }
        assert_eq!(UnitType::FlowRate.to_string(), "flow_rate");
    }

    #[test]
    fn test_lenient_lookup_defaults_to_unknown() {
        assert_eq!(UnitType::from_name(Some("length")), UnitType::Length);
        assert_eq!(UnitType::from_name(Some("LENGTH")), UnitType::Unknown);
        assert_eq!(UnitType::from_name(None), UnitType::Unknown);
        assert_eq!(DataType::from_name(Some("float")), DataType::Float);
        assert_eq!(DataType::from_name(Some("decimal")), DataType::Unknown);
        assert_eq!(DataType::from_name(None), DataType::Unknown);
    }

    #[test]
    fn test_strict_parse_rejects_unknown_names() {
        assert!("weight".parse::<UnitType>().is_err());
        assert!("text".parse::<DataType>().is_err());
    }

    #[test]
    fn test_convertable_unit_types() {
        assert!(UnitType::Length.is_convertable());
        assert!(UnitType::Temperature.is_convertable());
        assert!(!UnitType::None.is_convertable());
        assert!(!UnitType::Unknown.is_convertable());
        assert!(!UnitType::Quantity.is_convertable());
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&UnitType::FlowRate).unwrap();
        assert_eq!(json, "\"flow_rate\"");
        let data_type: DataType = serde_json::from_str("\"boolean\"").unwrap();
        assert_eq!(data_type, DataType::Boolean);
    }
}
