//! Table output formatting

use serde_json::Value;
use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::formatters::{MAX_CELL_WIDTH, format_value, truncate};

/// Format typed rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    style(&mut table);
    table.to_string()
}

/// Format loosely typed records as a table.
///
/// Columns are the scalar fields in first-seen order across all records;
/// nested objects and arrays are left to the JSON and pretty formats.
/// Records that are not objects get a single `value` column.
pub fn format_record_table(records: &[Value]) -> String {
    if records.is_empty() {
        return "No results found.".to_string();
    }

    let columns = scalar_columns(records);
    let mut builder = Builder::default();

    if columns.is_empty() {
        builder.push_record(["value"]);
        for record in records {
            builder.push_record([truncate(&format_value("value", record), MAX_CELL_WIDTH)]);
        }
    } else {
        builder.push_record(columns.iter().map(|c| c.to_string()));
        for record in records {
            builder.push_record(columns.iter().map(|column| {
                let cell = record
                    .get(column.as_str())
                    .map(|v| format_value(column, v))
                    .unwrap_or_default();
                truncate(&cell, MAX_CELL_WIDTH)
            }));
        }
    }

    let mut table = builder.build();
    style(&mut table);
    table.to_string()
}

fn scalar_columns(records: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for (key, value) in map {
                let scalar = !matches!(value, Value::Object(_) | Value::Array(_));
                if scalar && !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

fn style(table: &mut Table) {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
}
