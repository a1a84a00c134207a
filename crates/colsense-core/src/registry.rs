//! Registry of classifiers keyed by lowercase name.

use std::collections::BTreeMap;

use crate::classifier::Classifier;

/// Holds, filters and orders classifiers.
///
/// Names are lowercased on registration, so registering a classifier whose
/// name differs only in case replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct ClassifierRegistry {
    classifiers: BTreeMap<String, Classifier>,
}

impl ClassifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the classifier's patterns and stores it.
    pub fn register(&mut self, mut classifier: Classifier) {
        classifier.setup_patterns();
        self.classifiers
            .insert(classifier.name().to_lowercase(), classifier);
    }

    /// Looks up a classifier by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Classifier> {
        self.classifiers.get(&name.to_lowercase())
    }

    /// Returns the classifiers named in `active` (all of them when `active`
    /// is `None` or empty), optionally sorted by descending priority.
    ///
    /// Equal priorities keep lowercase name order.
    pub fn get_classifiers(&self, active: Option<&[String]>, sorted_by_priority: bool) -> Vec<&Classifier> {
        let mut classifiers: Vec<&Classifier> = match active {
            Some(names) if !names.is_empty() => {
                let wanted: Vec<String> = names.iter().map(|name| name.to_lowercase()).collect();
                self.classifiers
                    .iter()
                    .filter(|(key, _)| wanted.contains(key))
                    .map(|(_, classifier)| classifier)
                    .collect()
            }
            _ => self.classifiers.values().collect(),
        };
        if sorted_by_priority {
            classifiers.sort_by(|a, b| b.priority().cmp(&a.priority()));
        }
        classifiers
    }

    /// Registered names as given at registration.
    pub fn names(&self) -> Vec<String> {
        self.classifiers
            .values()
            .map(|classifier| classifier.name().to_string())
            .collect()
    }

    pub fn clear(&mut self) {
        self.classifiers.clear();
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }
}
