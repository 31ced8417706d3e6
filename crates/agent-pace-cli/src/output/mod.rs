pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use clap::ValueEnum;
use serde_json::Value;

/// How a command's result envelope is rendered.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Full envelope as JSON (pretty on a terminal, compact when piped)
    Json,
    /// Field/value tables, one per top-level section
    Table,
    /// Flattened key,value rows
    Csv,
    /// Headline figures only, one per line
    Minimal,
}

pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}
