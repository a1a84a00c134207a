//! Materialized column data.

use std::collections::BTreeSet;

use colsense_common::{Cell, CellKind, any_to_cell};
use polars::prelude::{AnyValue, DataFrame};

use crate::error::InputError;

/// A named sequence of cells, nulls included.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Builds a column from anything convertible into cells.
    ///
    /// ```
    /// use colsense_core::Column;
    ///
    /// let column = Column::from_values("count", [Some(1), None, Some(3)]);
    /// assert_eq!(column.null_count(), 1);
    /// ```
    pub fn from_values<I, T>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cell>,
    {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_null()).count()
    }

    pub fn non_null_count(&self) -> usize {
        self.len() - self.null_count()
    }

    pub fn non_null(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| !cell.is_null())
    }

    /// Distinct storage kinds among the non-null cells.
    pub fn kinds(&self) -> BTreeSet<CellKind> {
        self.cells.iter().filter_map(Cell::kind).collect()
    }

    /// True when the column would be stored as a floating point array:
    /// only numeric cells, at least one of them a float.
    pub fn is_float_storage(&self) -> bool {
        let kinds = self.kinds();
        kinds.contains(&CellKind::Float)
            && !kinds.contains(&CellKind::Str)
            && !kinds.contains(&CellKind::Bool)
    }
}

/// Columns of equal length, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    columns: Vec<Column>,
}

impl ColumnTable {
    /// Creates a table, rejecting columns of unequal length.
    pub fn new(columns: Vec<Column>) -> Result<Self, InputError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(ragged) = columns.iter().find(|column| column.len() != expected) {
                return Err(InputError::RaggedColumn {
                    column: ragged.name().to_string(),
                    expected,
                    actual: ragged.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Converts a Polars frame cell by cell.
    pub fn from_frame(df: &DataFrame) -> Self {
        let height = df.height();
        let columns = df
            .get_columns()
            .iter()
            .map(|series| {
                let cells = (0..height)
                    .map(|idx| any_to_cell(series.get(idx).unwrap_or(AnyValue::Null)))
                    .collect();
                Column::new(series.name().to_string(), cells)
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_kinds() {
        let column = Column::new(
            "mixed",
            vec![Cell::from("1"), Cell::Int(2), Cell::Null, Cell::Float(2.5)],
        );
        assert_eq!(column.len(), 4);
        assert_eq!(column.null_count(), 1);
        assert_eq!(column.non_null_count(), 3);
        assert_eq!(
            column.kinds().into_iter().collect::<Vec<_>>(),
            vec![CellKind::Int, CellKind::Float, CellKind::Str]
        );
        assert!(!column.is_float_storage());
    }

    #[test]
    fn test_float_storage() {
        assert!(Column::from_values("a", [1.0, 2.0]).is_float_storage());
        assert!(Column::new("b", vec![Cell::Int(1), Cell::Float(2.5)]).is_float_storage());
        assert!(!Column::from_values("c", [1i64, 2]).is_float_storage());
        assert!(!Column::from_values("d", Vec::<f64>::new()).is_float_storage());
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let err = ColumnTable::new(vec![
            Column::from_values("a", [1i64, 2]),
            Column::from_values("b", [1i64]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            InputError::RaggedColumn {
                column: "b".to_string(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_table_from_frame() {
        use polars::prelude::{Column as PlColumn, DataFrame};

        let df = DataFrame::new(vec![
            PlColumn::new("length_mm".into(), &[100i64, 200]),
            PlColumn::new("name".into(), &[Some("a"), None]),
        ])
        .unwrap();
        let table = ColumnTable::from_frame(&df);
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 2);
        assert_eq!(table.get("length_mm").unwrap().cells(), &[Cell::Int(100), Cell::Int(200)]);
        assert_eq!(table.get("name").unwrap().null_count(), 1);
    }
}
