//! The fixed catalog of measurement units.
//!
//! Every unit the classifiers can report is declared here. Configuration may
//! add alternate spellings for these units, but never new units.

use crate::enums::UnitType;
use crate::error::{ModelError, Result};
use crate::unit::Unit;

pub const NONE: Unit = Unit::new("None", "", UnitType::None, 1.0);
pub const UNKNOWN: Unit = Unit::new("Unknown", "?", UnitType::Unknown, 1.0);

// Length
pub const MILLIMETER: Unit = Unit::new("Millimeter", "mm", UnitType::Length, 0.001);
pub const CENTIMETER: Unit = Unit::new("Centimeter", "cm", UnitType::Length, 0.01);
pub const METER: Unit = Unit::new("Meter", "m", UnitType::Length, 1.0);
pub const KILOMETER: Unit = Unit::new("Kilometer", "km", UnitType::Length, 1000.0);

// Area
pub const SQUARE_MILLIMETER: Unit = Unit::new("Quadratmillimeter", "mm²", UnitType::Area, 1e-6);
pub const SQUARE_CENTIMETER: Unit = Unit::new("Quadratzentimeter", "cm²", UnitType::Area, 1e-4);
pub const SQUARE_METER: Unit = Unit::new("Quadratmeter", "m²", UnitType::Area, 1.0);

// Volume
pub const CUBIC_MILLIMETER: Unit = Unit::new("Kubikmillimeter", "mm³", UnitType::Volume, 1e-9);
pub const CUBIC_CENTIMETER: Unit = Unit::new("Kubikzentimeter", "cm³", UnitType::Volume, 1e-6);
pub const CUBIC_METER: Unit = Unit::new("Kubikmeter", "m³", UnitType::Volume, 1.0);
pub const LITER: Unit = Unit::new("Liter", "l", UnitType::Volume, 0.001);

// Mass
pub const GRAM: Unit = Unit::new("Gramm", "g", UnitType::Mass, 0.001);
pub const KILOGRAM: Unit = Unit::new("Kilogramm", "kg", UnitType::Mass, 1.0);
pub const TON: Unit = Unit::new("Tonne", "t", UnitType::Mass, 1000.0);

// Time
pub const SECOND: Unit = Unit::new("Sekunde", "s", UnitType::Time, 1.0);
pub const MINUTE: Unit = Unit::new("Minute", "min", UnitType::Time, 60.0);
pub const HOUR: Unit = Unit::new("Stunde", "h", UnitType::Time, 3600.0);

// Quantity
pub const PIECE: Unit = Unit::new("Stück", "Stk", UnitType::Quantity, 1.0);

// Pressure
pub const PASCAL: Unit = Unit::new("Pascal", "Pa", UnitType::Pressure, 1.0);
pub const KILOPASCAL: Unit = Unit::new("Kilopascal", "kPa", UnitType::Pressure, 1000.0);
pub const MEGAPASCAL: Unit = Unit::new("Megapascal", "MPa", UnitType::Pressure, 1e6);
pub const BAR: Unit = Unit::new("Bar", "bar", UnitType::Pressure, 1e5);
pub const PSI: Unit = Unit::new("Pounds per square inch", "psi", UnitType::Pressure, 6894.76);

// Temperature: offsets rather than factors.
pub const CELSIUS: Unit =
    Unit::with_conversion("Grad Celsius", "°C", UnitType::Temperature, 1.0, celsius_to_kelvin);
pub const KELVIN: Unit =
    Unit::with_conversion("Kelvin", "K", UnitType::Temperature, 1.0, kelvin_to_celsius);

// Electrical
pub const VOLT: Unit = Unit::new("Volt", "V", UnitType::Voltage, 1.0);
pub const KILOVOLT: Unit = Unit::new("Kilovolt", "kV", UnitType::Voltage, 1000.0);
pub const AMPERE: Unit = Unit::new("Ampere", "A", UnitType::Current, 1.0);
pub const MILLIAMPERE: Unit = Unit::new("Milliampere", "mA", UnitType::Current, 0.001);
pub const WATT: Unit = Unit::new("Watt", "W", UnitType::Power, 1.0);
pub const KILOWATT: Unit = Unit::new("Kilowatt", "kW", UnitType::Power, 1000.0);
pub const KILOWATT_HOUR: Unit = Unit::new("Kilowattstunde", "kWh", UnitType::Energy, 3.6e6);

// Velocity
pub const METER_PER_SECOND: Unit = Unit::new("Meter pro Sekunde", "m/s", UnitType::Velocity, 1.0);
pub const KILOMETER_PER_HOUR: Unit =
    Unit::new("Kilometer pro Stunde", "km/h", UnitType::Velocity, 0.277778);
pub const MILES_PER_HOUR: Unit = Unit::new("Miles per hour", "mph", UnitType::Velocity, 0.44704);

// Flow rate
pub const LITER_PER_SECOND: Unit =
    Unit::new("Liter pro Sekunde", "l/s", UnitType::FlowRate, 0.001);
pub const LITER_PER_MINUTE: Unit =
    Unit::new("Liter pro Minute", "l/min", UnitType::FlowRate, 0.0000167);
pub const CUBIC_METER_PER_HOUR: Unit =
    Unit::new("Kubikmeter pro Stunde", "m³/h", UnitType::FlowRate, 0.000278);

// Angle
pub const DEGREE: Unit = Unit::new("Grad", "°", UnitType::Angle, 1.0);
pub const RADIAN: Unit = Unit::new("Radiant", "rad", UnitType::Angle, 57.2958);

fn celsius_to_kelvin(value: f64) -> f64 {
    value + 273.0
}

fn kelvin_to_celsius(value: f64) -> f64 {
    value - 273.0
}

static ALL_UNITS: [Unit; 42] = [
    NONE,
    UNKNOWN,
    MILLIMETER,
    CENTIMETER,
    METER,
    KILOMETER,
    SQUARE_MILLIMETER,
    SQUARE_CENTIMETER,
    SQUARE_METER,
    CUBIC_MILLIMETER,
    CUBIC_CENTIMETER,
    CUBIC_METER,
    LITER,
    GRAM,
    KILOGRAM,
    TON,
    SECOND,
    MINUTE,
    HOUR,
    PIECE,
    PASCAL,
    KILOPASCAL,
    MEGAPASCAL,
    BAR,
    PSI,
    CELSIUS,
    KELVIN,
    VOLT,
    KILOVOLT,
    AMPERE,
    MILLIAMPERE,
    WATT,
    KILOWATT,
    KILOWATT_HOUR,
    METER_PER_SECOND,
    KILOMETER_PER_HOUR,
    MILES_PER_HOUR,
    LITER_PER_SECOND,
    LITER_PER_MINUTE,
    CUBIC_METER_PER_HOUR,
    DEGREE,
    RADIAN,
];

/// All predefined units, sentinels included.
pub fn all_units() -> &'static [Unit] {
    &ALL_UNITS
}

/// Predefined units of one unit type.
pub fn units_of(unit_type: UnitType) -> Vec<Unit> {
    ALL_UNITS
        .iter()
        .filter(|unit| unit.unit_type == unit_type)
        .copied()
        .collect()
}

/// Predefined units that take part in conversion.
pub fn convertable_units() -> Vec<Unit> {
    ALL_UNITS
        .iter()
        .filter(|unit| unit.is_convertable())
        .copied()
        .collect()
}

pub fn placeholder(unit_type: UnitType) -> Unit {
    Unit::placeholder(unit_type)
}

/// Resolves a unit from its display string, e.g. `"length (mm)"`, `"none"`
/// or the placeholder form `"mass (~)"`.
pub fn unit_by_display_name(display_name: &str) -> Result<Unit> {
    if let Some(unit) = ALL_UNITS
        .iter()
        .find(|unit| unit.display_name() == display_name)
    {
        return Ok(*unit);
    }

    let type_name = display_name.split_whitespace().next();
    let candidate = Unit::placeholder(UnitType::from_name(type_name));
    if candidate.display_name() == display_name {
        Ok(candidate)
    } else {
        Err(ModelError::UnknownUnit(display_name.to_string()))
    }
}
