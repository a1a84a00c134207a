//! Per-column classification results.

use serde::Serialize;

use crate::enums::DataType;
use crate::unit::Unit;

/// Data type, unit and quality metrics inferred for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTypeUnit {
    pub data_type: DataType,
    pub unit: Unit,
    pub confidence: f64,
    pub classifier_name: String,
    /// Number of non-null values.
    pub total_values: usize,
    pub null_count: usize,
    /// Non-null values that failed numeric coercion.
    pub non_convertible_count: usize,
}

impl DataTypeUnit {
    /// All values, nulls included.
    pub fn total_count(&self) -> usize {
        self.total_values + self.null_count
    }

    pub fn convertible_count(&self) -> usize {
        self.total_values.saturating_sub(self.non_convertible_count)
    }

    /// Share of non-null values that convert, in percent.
    pub fn convertible_percentage(&self) -> f64 {
        if self.total_values == 0 {
            return 0.0;
        }
        self.convertible_count() as f64 / self.total_values as f64 * 100.0
    }

    /// Share of null values in the whole column, in percent.
    pub fn null_percentage(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        self.null_count as f64 / total as f64 * 100.0
    }

    /// Weighted score in `[0, 1]`: 40% completeness, 60% convertibility.
    pub fn data_quality_score(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        let completeness = self.total_values as f64 / total as f64;
        let convertibility = if self.total_values == 0 {
            0.0
        } else {
            self.convertible_count() as f64 / self.total_values as f64
        };
        completeness * 0.4 + convertibility * 0.6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn result(total_values: usize, null_count: usize, non_convertible_count: usize) -> DataTypeUnit {
        DataTypeUnit {
            data_type: DataType::Integer,
            unit: catalog::NONE,
            confidence: 0.5,
            classifier_name: "General".to_string(),
            total_values,
            null_count,
            non_convertible_count,
        }
    }

    #[test]
    fn test_derived_counts() {
        let r = result(4, 1, 1);
        assert_eq!(r.total_count(), 5);
        assert_eq!(r.convertible_count(), 3);
        assert!((r.convertible_percentage() - 75.0).abs() < 1e-9);
        assert!((r.null_percentage() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_quality_score_weights() {
        let r = result(4, 1, 1);
        // 0.8 * 0.4 + 0.75 * 0.6
        assert!((r.data_quality_score() - 0.77).abs() < 1e-9);
        assert!((result(3, 0, 0).data_quality_score() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_column_metrics_are_zero() {
        let r = result(0, 0, 0);
        assert_eq!(r.convertible_percentage(), 0.0);
        assert_eq!(r.null_percentage(), 0.0);
        assert_eq!(r.data_quality_score(), 0.0);

        let all_null = result(0, 3, 0);
        assert_eq!(all_null.null_percentage(), 100.0);
        assert_eq!(all_null.data_quality_score(), 0.0);
    }
}
