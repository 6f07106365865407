//! Output formatting for CLI results

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::client::Records;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

impl Formattable for Records {
    fn format(&self, format: OutputFormat) -> Result<String> {
        format_values(&self.to_vec(), self.result_count(), format)
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

/// Print one typed record, e.g. the group a create call returned
pub fn print_record<T: Serialize>(record: &T, format: OutputFormat) -> Result<()> {
    let value = serde_json::to_value(record)?;
    println!("{}", format_values(&[value], None, format)?);
    Ok(())
}

fn format_values(records: &[Value], result_count: Option<u64>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::format_record_table(records)),
        OutputFormat::Json => Ok(json::format_records_json(records, result_count)?),
        OutputFormat::Pretty => Ok(format_pretty(records)),
    }
}

/// One block per record, every field on its own line.
fn format_pretty(records: &[Value]) -> String {
    if records.is_empty() {
        return "No results found.".to_string();
    }

    let mut blocks = Vec::with_capacity(records.len());
    for record in records {
        let block = match record {
            Value::Object(map) => {
                let width = map.keys().map(|k| k.len()).max().unwrap_or(0);
                map.iter()
                    .map(|(key, value)| {
                        format!(
                            "{:width$}  {}",
                            key.bold(),
                            formatters::format_value(key, value),
                            width = width
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            other => formatters::format_value("value", other),
        };
        blocks.push(block);
    }

    blocks.join("\n\n")
}
