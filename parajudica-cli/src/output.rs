//! Query answer rendering.

use parajudica_query::Table;
use serde_json::{json, Value as JsonValue};

use crate::cli::OutputFormat;

/// Render a query answer to stdout in the selected format.
pub fn print_table(name: &str, table: &Table, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("# {name} ({} rows)", table.len());
            print!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", to_json(table));
        }
    }
}

/// JSON rows keyed by output variable, cells rendered as text.
fn to_json(table: &Table) -> JsonValue {
    let rows: Vec<JsonValue> = table
        .rows
        .iter()
        .map(|row| {
            let object: serde_json::Map<String, JsonValue> = table
                .columns
                .iter()
                .zip(row)
                .map(|(column, cell)| (column.to_string(), json!(Table::cell_text(cell))))
                .collect();
            JsonValue::Object(object)
        })
        .collect();
    json!(rows)
}
