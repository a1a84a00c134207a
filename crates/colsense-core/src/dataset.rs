//! Input shapes accepted by the engine and their normalization into columns.
//!
//! Row-oriented input can be read two ways: column by column straight from
//! the rows, or by transposing everything into a [`ColumnTable`] first. Both
//! go through the same name derivation and cell conversion, so they produce
//! identical columns.

use colsense_common::Cell;
use serde_json::{Map, Value};

use crate::column::{Column, ColumnTable};
use crate::error::InputError;

/// A JSON object standing for one row.
pub type Record = Map<String, Value>;

/// Tabular input in one of the supported shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// Named columns of equal length.
    Table(ColumnTable),
    /// One mapping of column name to value per row.
    Records(Vec<Record>),
    /// One sequence of values per row.
    Rows(Vec<Vec<Value>>),
}

impl Dataset {
    /// Classifies an untyped JSON document.
    ///
    /// Objects of arrays become tables, arrays of objects records and arrays
    /// of arrays rows. Anything else is rejected.
    pub fn from_json(value: Value) -> Result<Self, InputError> {
        match value {
            Value::Object(map) => {
                let columns = map
                    .into_iter()
                    .map(|(name, values)| match values {
                        Value::Array(items) => {
                            Ok(Column::new(name, items.iter().map(Cell::from_json).collect()))
                        }
                        _ => Err(InputError::NotAnArray { column: name }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Dataset::Table(ColumnTable::new(columns)?))
            }
            Value::Array(items) => Self::from_json_rows(items),
            other => Err(InputError::UnsupportedShape(json_kind(&other).to_string())),
        }
    }

    fn from_json_rows(items: Vec<Value>) -> Result<Self, InputError> {
        match items.first() {
            None => Ok(Dataset::Rows(Vec::new())),
            Some(Value::Object(_)) => items
                .into_iter()
                .enumerate()
                .map(|(row, item)| match item {
                    Value::Object(record) => Ok(record),
                    _ => Err(InputError::MixedRows { row }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Dataset::Records),
            Some(Value::Array(_)) => items
                .into_iter()
                .enumerate()
                .map(|(row, item)| match item {
                    Value::Array(values) => Ok(values),
                    _ => Err(InputError::MixedRows { row }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Dataset::Rows),
            Some(other) => Err(InputError::UnsupportedShape(format!(
                "array of {}",
                json_kind(other)
            ))),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Dataset::Table(table) => table.height(),
            Dataset::Records(records) => records.len(),
            Dataset::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Dataset::Table(table) => table.is_empty(),
            Dataset::Records(records) => records.is_empty(),
            Dataset::Rows(rows) => rows.is_empty(),
        }
    }
}

impl From<ColumnTable> for Dataset {
    fn from(table: ColumnTable) -> Self {
        Dataset::Table(table)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Row-oriented input with its column names resolved.
#[derive(Debug)]
pub(crate) enum RowLayout<'a> {
    Records {
        records: &'a [Record],
        names: Vec<String>,
    },
    Rows {
        rows: &'a [Vec<Value>],
        names: Vec<String>,
    },
}

impl<'a> RowLayout<'a> {
    /// Keys of all records in first-seen order.
    pub(crate) fn records(records: &'a [Record]) -> Self {
        let mut names: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !names.iter().any(|name| name == key) {
                    names.push(key.clone());
                }
            }
        }
        RowLayout::Records { records, names }
    }

    /// Column names come from `headers`, or `Column_<idx>` over the width
    /// of the first row.
    pub(crate) fn rows(rows: &'a [Vec<Value>], headers: Option<Vec<String>>) -> Self {
        let names = match headers {
            Some(headers) if !headers.is_empty() => headers,
            _ => {
                let width = rows.first().map_or(0, Vec::len);
                (0..width).map(|idx| format!("Column_{idx}")).collect()
            }
        };
        RowLayout::Rows { rows, names }
    }

    pub(crate) fn names(&self) -> &[String] {
        match self {
            RowLayout::Records { names, .. } | RowLayout::Rows { names, .. } => names,
        }
    }

    pub(crate) fn row_count(&self) -> usize {
        match self {
            RowLayout::Records { records, .. } => records.len(),
            RowLayout::Rows { rows, .. } => rows.len(),
        }
    }

    /// Reads one column straight from the rows. Missing values are null.
    pub(crate) fn column(&self, idx: usize) -> Column {
        match self {
            RowLayout::Records { records, names } => {
                let name = &names[idx];
                let cells = records
                    .iter()
                    .map(|record| record.get(name).map_or(Cell::Null, Cell::from_json))
                    .collect();
                Column::new(name.clone(), cells)
            }
            RowLayout::Rows { rows, names } => {
                let cells = rows
                    .iter()
                    .map(|row| row.get(idx).map_or(Cell::Null, Cell::from_json))
                    .collect();
                Column::new(names[idx].clone(), cells)
            }
        }
    }

    /// Transposes all rows into a table in a single pass.
    ///
    /// Cells keep their JSON kind. A Polars frame would force one dtype per
    /// column and cast mixed columns, so the table is built from cells
    /// directly; `ColumnTable::from_frame` covers real frames.
    pub(crate) fn to_table(&self) -> ColumnTable {
        let names = self.names();
        let mut columns: Vec<Vec<Cell>> = names
            .iter()
            .map(|_| Vec::with_capacity(self.row_count()))
            .collect();

        match self {
            RowLayout::Records { records, names } => {
                for record in *records {
                    for (cells, name) in columns.iter_mut().zip(names) {
                        cells.push(record.get(name).map_or(Cell::Null, Cell::from_json));
                    }
                }
            }
            RowLayout::Rows { rows, .. } => {
                for row in *rows {
                    for (idx, cells) in columns.iter_mut().enumerate() {
                        cells.push(row.get(idx).map_or(Cell::Null, Cell::from_json));
                    }
                }
            }
        }

        let columns = names
            .iter()
            .zip(columns)
            .map(|(name, cells)| Column::new(name.clone(), cells))
            .collect();
        ColumnTable::new(columns).unwrap_or_default()
    }
}

/// Splits a header row off the front of row data.
///
/// Returns the stringified headers and the remaining rows.
pub(crate) fn split_header_row(rows: &[Vec<Value>]) -> (Option<Vec<String>>, &[Vec<Value>]) {
    match rows.split_first() {
        Some((header, rest)) => {
            let headers = header
                .iter()
                .map(|value| Cell::from_json(value).to_string())
                .collect();
            (Some(headers), rest)
        }
        None => (None, rows),
    }
}
