//! Physical units of measurement.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use crate::enums::UnitType;

/// Symbol shared by every placeholder unit.
pub const PLACEHOLDER_SYMBOL: &str = "~";

/// A unit of measurement.
///
/// Two units are equal when they share symbol and unit type; name and
/// conversion factor are descriptive only.
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    pub name: &'static str,
    pub symbol: &'static str,
    pub unit_type: UnitType,
    /// Factor converting one of this unit into the base unit of its type.
    pub base_factor: f64,
    /// Nonlinear conversion used instead of `base_factor` when present.
    pub convert_fn: Option<fn(f64) -> f64>,
}

impl Unit {
    pub const fn new(
        name: &'static str,
        symbol: &'static str,
        unit_type: UnitType,
        base_factor: f64,
    ) -> Self {
        Self {
            name,
            symbol,
            unit_type,
            base_factor,
            convert_fn: None,
        }
    }

    pub const fn with_conversion(
        name: &'static str,
        symbol: &'static str,
        unit_type: UnitType,
        base_factor: f64,
        convert_fn: fn(f64) -> f64,
    ) -> Self {
        Self {
            name,
            symbol,
            unit_type,
            base_factor,
            convert_fn: Some(convert_fn),
        }
    }

    /// The placeholder meaning "some unit of this type, exact unit unknown".
    pub const fn placeholder(unit_type: UnitType) -> Self {
        Self::new("Placeholder", PLACEHOLDER_SYMBOL, unit_type, 1.0)
    }

    pub fn is_unknown(&self) -> bool {
        self.unit_type == UnitType::Unknown && self.symbol == "?"
    }

    pub fn is_none_type(&self) -> bool {
        self.unit_type == UnitType::None
    }

    pub fn is_placeholder(&self) -> bool {
        self.symbol == PLACEHOLDER_SYMBOL
    }

    /// True unless the unit is unknown, unitless or a plain count.
    pub fn is_convertable(&self) -> bool {
        !self.is_unknown() && self.unit_type.is_convertable()
    }

    /// Canonical display string: `"<unit_type> (<symbol>)"`, or just the
    /// type name for unitless units.
    pub fn display_name(&self) -> String {
        if self.unit_type == UnitType::None {
            return self.unit_type.as_str().to_string();
        }
        format!("{} ({})", self.unit_type.as_str(), self.symbol)
    }

    /// Converts `value` expressed in this unit into `target`.
    ///
    /// Values pass through unchanged when either unit is not convertable,
    /// when the types differ, or when both are the same unit.
    pub fn convert_to(&self, value: f64, target: &Unit) -> f64 {
        if !self.is_convertable() || self.unit_type != target.unit_type || self == target {
            return value;
        }
        match self.convert_fn {
            Some(convert) => convert(value),
            None => value * self.base_factor / target.base_factor,
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.unit_type == other.unit_type
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        self.unit_type.hash(state);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display_name())
    }
}
