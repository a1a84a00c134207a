//! Unit extraction from column names.
//!
//! Strategies run in a fixed order and the first hit wins:
//! bracketed token, whole name, trailing token after a separator,
//! context keyword, and finally the unknown unit.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use colsense_model::catalog::{self, all_units, unit_by_display_name};
use colsense_model::{Configuration, Unit, UnitType};
use regex::Regex;
use tracing::{debug, warn};

static BRACKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("Invalid bracket regex"));

/// Separators tried for the suffix strategy, in order.
const SEPARATORS: [char; 4] = ['_', '-', '.', ' '];

/// Symbols that are never mapped directly: sentinels and single letters
/// too common inside words.
const EXCLUDED_SYMBOLS: &[&str] = &["", "?", "~", "a", "k", "m", "g", "h", "s"];

/// Alternate spellings for catalog units.
const MANUAL_MAPPINGS: &[(&str, Unit)] = &[
    ("millimeter", catalog::MILLIMETER),
    ("centimeter", catalog::CENTIMETER),
    ("meter", catalog::METER),
    ("kilometer", catalog::KILOMETER),
    ("mm2", catalog::SQUARE_MILLIMETER),
    ("cm2", catalog::SQUARE_CENTIMETER),
    ("m2", catalog::SQUARE_METER),
    ("mm3", catalog::CUBIC_MILLIMETER),
    ("cm3", catalog::CUBIC_CENTIMETER),
    ("m3", catalog::CUBIC_METER),
    ("liter", catalog::LITER),
    ("gramm", catalog::GRAM),
    ("kilogramm", catalog::KILOGRAM),
    ("tonne", catalog::TON),
    ("sekunde", catalog::SECOND),
    ("minute", catalog::MINUTE),
    ("stunde", catalog::HOUR),
    ("stück", catalog::PIECE),
    ("pieces", catalog::PIECE),
    ("pcs", catalog::PIECE),
    ("count", catalog::PIECE),
    ("pascal", catalog::PASCAL),
    ("kilopascal", catalog::KILOPASCAL),
    ("megapascal", catalog::MEGAPASCAL),
    ("celsius", catalog::CELSIUS),
    ("kelvin", catalog::KELVIN),
    ("volt", catalog::VOLT),
    ("kilovolt", catalog::KILOVOLT),
    ("ampere", catalog::AMPERE),
    ("milliampere", catalog::MILLIAMPERE),
    ("watt", catalog::WATT),
    ("kilowatt", catalog::KILOWATT),
    ("kilowattstunde", catalog::KILOWATT_HOUR),
    ("m3/h", catalog::CUBIC_METER_PER_HOUR),
    ("grad", catalog::DEGREE),
    ("degree", catalog::DEGREE),
    ("radiant", catalog::RADIAN),
    ("radian", catalog::RADIAN),
];

/// Bilingual keywords hinting at a unit type, in lookup order.
const CONTEXT_MAPPINGS: &[(&str, UnitType)] = &[
    ("länge", UnitType::Length),
    ("length", UnitType::Length),
    ("breite", UnitType::Length),
    ("width", UnitType::Length),
    ("höhe", UnitType::Length),
    ("height", UnitType::Length),
    ("tiefe", UnitType::Length),
    ("depth", UnitType::Length),
    ("dicke", UnitType::Length),
    ("thickness", UnitType::Length),
    ("durchmesser", UnitType::Length),
    ("diameter", UnitType::Length),
    ("fläche", UnitType::Area),
    ("area", UnitType::Area),
    ("grundfläche", UnitType::Area),
    ("footprint", UnitType::Area),
    ("volumen", UnitType::Volume),
    ("volume", UnitType::Volume),
    ("inhalt", UnitType::Volume),
    ("capacity", UnitType::Volume),
    ("gewicht", UnitType::Mass),
    ("weight", UnitType::Mass),
    ("masse", UnitType::Mass),
    ("preis", UnitType::Currency),
    ("price", UnitType::Currency),
    ("kosten", UnitType::Currency),
    ("cost", UnitType::Currency),
    ("anzahl", UnitType::Quantity),
    ("count", UnitType::Quantity),
    ("menge", UnitType::Quantity),
    ("quantity", UnitType::Quantity),
    ("temperatur", UnitType::Temperature),
    ("temperature", UnitType::Temperature),
    ("temp", UnitType::Temperature),
    ("druck", UnitType::Pressure),
    ("pressure", UnitType::Pressure),
    ("spannung", UnitType::Voltage),
    ("voltage", UnitType::Voltage),
    ("strom", UnitType::Current),
    ("current", UnitType::Current),
    ("leistung", UnitType::Power),
    ("power", UnitType::Power),
    ("energie", UnitType::Energy),
    ("energy", UnitType::Energy),
    ("geschwindigkeit", UnitType::Velocity),
    ("velocity", UnitType::Velocity),
    ("speed", UnitType::Velocity),
    ("durchfluss", UnitType::FlowRate),
    ("flow", UnitType::FlowRate),
    ("flowrate", UnitType::FlowRate),
    ("winkel", UnitType::Angle),
    ("angle", UnitType::Angle),
    ("rotation", UnitType::Rotation),
    ("drehzahl", UnitType::Rotation),
];

/// Derives a candidate unit from a column name.
#[derive(Debug, Clone)]
pub struct UnitExtractor {
    direct_mappings: BTreeMap<String, Unit>,
    context_mappings: Vec<(String, UnitType)>,
    cache: HashMap<String, Unit>,
}

impl Default for UnitExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitExtractor {
    /// Creates an extractor seeded with catalog symbols, alternate
    /// spellings and context keywords.
    pub fn new() -> Self {
        let mut extractor = Self::empty();
        for unit in all_units() {
            let key = symbol_key(unit);
            if Self::is_valid_unit_symbol(&key) {
                extractor.direct_mappings.insert(key, *unit);
            }
        }
        for (key, unit) in MANUAL_MAPPINGS {
            extractor.direct_mappings.insert((*key).to_string(), *unit);
        }
        for (key, unit_type) in CONTEXT_MAPPINGS {
            extractor.add_context_mapping(*key, *unit_type);
        }
        extractor
    }

    /// Creates an extractor without any mappings.
    pub fn empty() -> Self {
        Self {
            direct_mappings: BTreeMap::new(),
            context_mappings: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// True if a lowercase symbol is specific enough to map directly.
    pub fn is_valid_unit_symbol(symbol_key: &str) -> bool {
        !EXCLUDED_SYMBOLS.contains(&symbol_key)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn direct_mappings(&self) -> &BTreeMap<String, Unit> {
        &self.direct_mappings
    }

    pub fn context_mappings(&self) -> &[(String, UnitType)] {
        &self.context_mappings
    }

    /// Direct mapping keys that are not plain catalog symbols.
    pub fn manual_mapping_keys(&self) -> Vec<&str> {
        let automatic: BTreeSet<String> = all_units()
            .iter()
            .map(symbol_key)
            .filter(|key| Self::is_valid_unit_symbol(key))
            .collect();
        self.direct_mappings
            .keys()
            .filter(|key| !automatic.contains(*key))
            .map(String::as_str)
            .collect()
    }

    pub fn add_direct_mapping(&mut self, key: impl Into<String>, unit: Unit) {
        self.direct_mappings.insert(key.into(), unit);
        self.cache.clear();
    }

    /// Adds a context keyword, or retargets an existing one in place.
    pub fn add_context_mapping(&mut self, key: impl Into<String>, unit_type: UnitType) {
        let key = key.into();
        match self.context_mappings.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = unit_type,
            None => self.context_mappings.push((key, unit_type)),
        }
        self.cache.clear();
    }

    /// Merges mappings from configuration, or replaces them when the
    /// configuration does not merge with defaults.
    ///
    /// Entries naming an unknown unit or unit type are skipped.
    pub fn load_configuration(&mut self, config: &Configuration) {
        if !config.merge_with_default {
            self.direct_mappings.clear();
            self.context_mappings.clear();
        }

        for (key, display_name) in &config.direct_mappings {
            match unit_by_display_name(display_name) {
                Ok(unit) => {
                    self.direct_mappings.insert(key.trim().to_lowercase(), unit);
                }
                Err(e) => warn!(key = %key, "Skipping direct mapping: {e}"),
            }
        }

        for (key, type_name) in &config.context_mappings {
            match type_name.parse::<UnitType>() {
                Ok(unit_type) => self.add_context_mapping(key.trim().to_lowercase(), unit_type),
                Err(e) => warn!(key = %key, "Skipping context mapping: {e}"),
            }
        }

        self.cache.clear();
        debug!(
            direct = self.direct_mappings.len(),
            context = self.context_mappings.len(),
            "Loaded unit mappings"
        );
    }

    /// Extracts the unit a column name refers to.
    ///
    /// Results are cached per name until [`clear_cache`](Self::clear_cache).
    pub fn extract_unit(&mut self, column_name: &str) -> Unit {
        if let Some(unit) = self.cache.get(column_name) {
            return *unit;
        }
        let unit = self.lookup(column_name);
        self.cache.insert(column_name.to_string(), unit);
        unit
    }

    fn lookup(&self, column_name: &str) -> Unit {
        let name_lower = column_name.to_lowercase();

        // "Length (mm)"
        if let Some(captures) = BRACKET_REGEX.captures(&name_lower)
            && let Some(unit) = self.direct_mappings.get(captures[1].trim())
        {
            return *unit;
        }

        if let Some(unit) = self.direct_mappings.get(name_lower.as_str()) {
            return *unit;
        }

        // "length_mm"
        for separator in SEPARATORS {
            let Some((_, suffix)) = name_lower.rsplit_once(separator) else {
                continue;
            };
            if let Some(unit) = self.direct_mappings.get(suffix.trim()) {
                return *unit;
            }
        }

        self.context_mappings
            .iter()
            .find(|(keyword, _)| name_lower.contains(keyword.as_str()))
            .map_or(catalog::UNKNOWN, |(_, unit_type)| Unit::placeholder(*unit_type))
    }
}

fn symbol_key(unit: &Unit) -> String {
    unit.symbol.trim().to_lowercase()
}
