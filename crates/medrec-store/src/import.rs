//! Loading records from CSV and JSON files.
//!
//! CSV input has a header row naming schema columns. Empty cells are
//! `NULL`, integer columns accept `42` or `42.0`, and JSON columns hold
//! JSON text. JSON input is an array of record objects.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use medrec_sql_core::{ColumnRef, SqlType, TableSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, StoreError};

/// Reads `path` as CSV when its extension is `csv`, as JSON otherwise.
///
/// # Errors
///
/// IO errors, malformed input, or records that do not match `T`.
pub fn load_records<T: DeserializeOwned>(
    path: &Path,
    schema: &TableSchema,
    json_columns: &[&str],
) -> Result<Vec<T>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let file = File::open(path)?;
    let records = if is_csv {
        read_csv(file, schema, json_columns)?
    } else {
        serde_json::from_reader(BufReader::new(file))?
    };
    debug!(path = %path.display(), count = records.len(), "Loaded records");
    Ok(records)
}

/// Parses CSV rows into records, typing each cell by its schema column.
///
/// Headers the schema does not know are passed through as text.
///
/// # Errors
///
/// [`StoreError::Csv`] for malformed CSV, [`StoreError::InvalidCell`] for a
/// cell that does not fit its column, [`StoreError::Serialization`] when a
/// row does not match `T`.
pub fn read_csv<T: DeserializeOwned, R: Read>(
    reader: R,
    schema: &TableSchema,
    json_columns: &[&str],
) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);
        let mut object = Map::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            let header = header.trim();
            let value = cell_value(schema, json_columns, header, cell).map_err(|reason| {
                StoreError::InvalidCell {
                    line,
                    column: header.to_string(),
                    reason,
                }
            })?;
            object.insert(header.to_string(), value);
        }
        records.push(serde_json::from_value(Value::Object(object))?);
    }
    Ok(records)
}

fn cell_value(
    schema: &TableSchema,
    json_columns: &[&str],
    column: &str,
    cell: &str,
) -> std::result::Result<Value, String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(Value::Null);
    }
    if json_columns.contains(&column) {
        return serde_json::from_str(cell).map_err(|e| format!("invalid JSON: {e}"));
    }
    match schema.column(column).map(ColumnRef::dtype) {
        Some(SqlType::Int | SqlType::AutoIncrement) => cell
            .strip_suffix(".0")
            .unwrap_or(cell)
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("'{cell}' is not an integer")),
        _ => Ok(Value::String(cell.to_string())),
    }
}
