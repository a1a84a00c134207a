//! Rendering of analysis results and configuration summaries.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use colsense_core::{Analysis, NO_CLASSIFIER};
use colsense_model::{Configuration, DataTypeUnit};

/// How analysis results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    Table,
    Json,
    Csv,
}

/// One output line per column.
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<&'a str>,
    data_type: &'static str,
    unit: String,
    confidence: f64,
    classifier: &'a str,
}

impl<'a> ResultRow<'a> {
    fn new(column: Option<&'a str>, result: &'a DataTypeUnit) -> Self {
        Self {
            column,
            data_type: result.data_type.as_str(),
            unit: result.unit.display_name(),
            confidence: result.confidence,
            classifier: &result.classifier_name,
        }
    }
}

pub fn render(analysis: &Analysis, format: ResultFormat, styled: bool) -> Result<String> {
    match format {
        ResultFormat::Table => {
            let mut table = result_table(analysis);
            if !styled {
                table.force_no_tty();
            }
            Ok(format!("{table}\n"))
        }
        ResultFormat::Json => render_json(analysis),
        ResultFormat::Csv => render_csv(analysis),
    }
}

/// Object keyed by column name, in column order.
pub fn render_json(analysis: &Analysis) -> Result<String> {
    let mut object = serde_json::Map::new();
    for (column, result) in analysis.iter() {
        let row = serde_json::to_value(ResultRow::new(None, result)).context("serialize result")?;
        object.insert(column.to_string(), row);
    }
    let mut json = serde_json::to_string_pretty(&serde_json::Value::Object(object))
        .context("serialize results")?;
    json.push('\n');
    Ok(json)
}

/// One record per column with a `column,data_type,unit,confidence,classifier`
/// header.
pub fn render_csv(analysis: &Analysis) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if analysis.is_empty() {
        writer
            .write_record(["column", "data_type", "unit", "confidence", "classifier"])
            .context("write csv header")?;
    }
    for (column, result) in analysis.iter() {
        writer
            .serialize(ResultRow::new(Some(column), result))
            .with_context(|| format!("write csv row for {column}"))?;
    }
    let bytes = writer.into_inner().context("flush csv output")?;
    String::from_utf8(bytes).context("csv output is not UTF-8")
}

pub fn result_table(analysis: &Analysis) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Data Type"),
        header_cell("Unit"),
        header_cell("Confidence"),
        header_cell("Classifier"),
        header_cell("Values"),
        header_cell("Nulls"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for (column, result) in analysis.iter() {
        table.add_row(vec![
            Cell::new(column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(result.data_type),
            unit_cell(result),
            confidence_cell(result.confidence),
            classifier_cell(&result.classifier_name),
            Cell::new(result.total_values),
            null_cell(result),
        ]);
    }
    table
}

/// Prints the counts of an exported configuration.
pub fn print_export_summary(config: &Configuration, path: &Path, format: &str) {
    println!("Configuration: {} ({format})", path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Section"), header_cell("Entries")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Direct mappings"), Cell::new(config.direct_mappings.len())]);
    table.add_row(vec![Cell::new("Context mappings"), Cell::new(config.context_mappings.len())]);
    for (key, classifier) in &config.classifiers {
        table.add_row(vec![
            Cell::new(format!("Classifier {key} (priority {})", classifier.priority)),
            Cell::new(classifier.patterns.len()),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn unit_cell(result: &DataTypeUnit) -> Cell {
    if result.unit.is_none_type() || result.unit.is_unknown() {
        dim_cell(result.unit.display_name())
    } else {
        Cell::new(result.unit.display_name())
    }
}

fn confidence_cell(confidence: f64) -> Cell {
    let cell = Cell::new(format!("{confidence:.2}"));
    if confidence >= 0.9 {
        cell.fg(Color::Green)
    } else if confidence < 0.6 {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

fn classifier_cell(name: &str) -> Cell {
    if name == NO_CLASSIFIER {
        Cell::new(name).fg(Color::Red)
    } else {
        Cell::new(name)
    }
}

fn null_cell(result: &DataTypeUnit) -> Cell {
    match result.null_count {
        0 => dim_cell(0),
        count if result.null_percentage() > 50.0 => Cell::new(count).fg(Color::Yellow),
        count => Cell::new(count),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
