//! Delimiter-separated files as sequences of flat mappings.
//!
//! The header row supplies the keys; each subsequent row becomes one mapping.
//! Cell values get scalar inference (null, bool, integer, float, string) so a
//! numeric column loads as numbers rather than strings.

use std::path::Path;

use serde_json::{Map, Number, Value};
use tracing::error;

use crate::error::{DataError, Result};

/// Read a `.csv`/`.tsv` file into one mapping per row.
pub fn read_rows(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|err| {
            error!(path = %path.display(), %err, "failed to open tabular file");
            match err.kind() {
                csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                    DataError::SourceNotFound(path.to_path_buf())
                }
                _ => DataError::parse(path.display().to_string(), err),
            }
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| {
            error!(path = %path.display(), %err, "failed to read header row");
            DataError::parse(path.display().to_string(), err)
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| {
            error!(path = %path.display(), %err, "failed to read tabular row");
            DataError::parse(path.display().to_string(), err)
        })?;

        let mut row = Map::new();
        for (index, header) in headers.iter().enumerate() {
            let cell = record.get(index).unwrap_or("");
            row.insert(header.clone(), infer_scalar(cell));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Interpret one cell the way a tabular loader would: empty cells are null,
/// then booleans, integers, and floats, falling back to the raw string.
fn infer_scalar(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match cell {
        "true" | "True" => return Value::Bool(true),
        "false" | "False" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(integer) = cell.parse::<i64>() {
        return Value::Number(integer.into());
    }
    if let Ok(float) = cell.parse::<f64>() {
        // NaN and infinities have no JSON representation; keep those as text.
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(cell.to_string())
}
