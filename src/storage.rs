use crate::compose::ChartDescription;
use crate::models::Row;
use anyhow::Result;
use serde_json::Value;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Errors while reading rows or options from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("expected a JSON array of objects, found {0}")]
    NotRows(&'static str),
    #[error("unsupported data format: {0}")]
    UnsupportedFormat(String),
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load rows from a `.json` or `.csv` file (format inferred from the extension).
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>, LoadError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let file = File::open(path)?;
    match ext.as_str() {
        "json" => rows_from_json_reader(file),
        "csv" => rows_from_csv_reader(file),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a JSON array of objects.
pub fn rows_from_json_reader<R: Read>(reader: R) -> Result<Vec<Row>, LoadError> {
    let value: Value = serde_json::from_reader(reader)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(LoadError::NotRows(json_kind(&other))),
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Ok(row),
            other => Err(LoadError::NotRows(json_kind(&other))),
        })
        .collect()
}

/// Parse CSV with a header row.
///
/// Cells that parse as numbers become JSON numbers, other cells stay strings, and empty
/// cells are left out of the row so they count as missing.
pub fn rows_from_csv_reader<R: Read>(reader: R) -> Result<Vec<Row>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row = Row::new();
        for (key, cell) in headers.iter().zip(record.iter()) {
            if cell.is_empty() {
                continue;
            }
            row.insert(key.to_string(), csv_cell(cell));
        }
        rows.push(row);
    }
    Ok(rows)
}

fn csv_cell(cell: &str) -> Value {
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    match cell.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::from(f),
        _ if cell.eq_ignore_ascii_case("null") => Value::Null,
        _ => Value::String(cell.to_string()),
    }
}

/// Save a chart description as pretty JSON.
pub fn save_description_json<P: AsRef<Path>>(desc: &ChartDescription, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(desc)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
