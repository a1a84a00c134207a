//! Per-column results of one analysis run.

use colsense_model::DataTypeUnit;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column name to classification result, in input column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    results: Vec<(String, DataTypeUnit)>,
}

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a result. A repeated column name replaces the earlier result in
    /// place.
    pub fn insert(&mut self, column: impl Into<String>, result: DataTypeUnit) {
        let column = column.into();
        match self.results.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = result,
            None => self.results.push((column, result)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&DataTypeUnit> {
        self.results
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataTypeUnit)> {
        self.results
            .iter()
            .map(|(name, result)| (name.as_str(), result))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl IntoIterator for Analysis {
    type Item = (String, DataTypeUnit);
    type IntoIter = std::vec::IntoIter<(String, DataTypeUnit)>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl FromIterator<(String, DataTypeUnit)> for Analysis {
    fn from_iter<I: IntoIterator<Item = (String, DataTypeUnit)>>(iter: I) -> Self {
        let mut analysis = Analysis::new();
        for (column, result) in iter {
            analysis.insert(column, result);
        }
        analysis
    }
}

impl Serialize for Analysis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.results.len()))?;
        for (column, result) in &self.results {
            map.serialize_entry(column, result)?;
        }
        map.end()
    }
}
