//! JSON record-list loading and writing.
//!
//! A record list is a JSON array of objects. Columns are the union of keys
//! in first-appearance order; a key missing from a record yields a missing
//! cell. A column whose values are all numbers (or missing) loads as
//! numeric, anything else as text.

use super::LoadOutcome;
use crate::error::{CleaningError, Result};
use crate::quality::rows_to_records;
use polars::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Parse a JSON array of records into a table.
pub fn load_records(bytes: &[u8], strict: bool) -> Result<LoadOutcome> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Array(entries) = value else {
        return Err(CleaningError::Decode(
            "record-list input must be a JSON array".to_string(),
        ));
    };

    let mut rows: Vec<&serde_json::Map<String, Value>> = Vec::with_capacity(entries.len());
    let mut skipped_rows = 0usize;
    for (idx, entry) in entries.iter().enumerate() {
        match entry {
            Value::Object(map) => rows.push(map),
            _ if strict => {
                return Err(CleaningError::Decode(format!(
                    "record {} is not an object",
                    idx
                )));
            }
            _ => skipped_rows += 1,
        }
    }

    if skipped_rows > 0 {
        warn!("Skipped {} non-record entries", skipped_rows);
    }

    if rows.is_empty() {
        return Ok(LoadOutcome {
            df: DataFrame::empty(),
            skipped_rows,
        });
    }

    // Key union, keeping the order keys first appear in.
    let mut keys: Vec<&String> = Vec::new();
    let mut seen: HashSet<&String> = HashSet::new();
    for row in &rows {
        for key in row.keys() {
            if seen.insert(key) {
                keys.push(key);
            }
        }
    }

    let columns: Vec<Column> = keys
        .iter()
        .map(|key| build_column(key, &rows))
        .collect();

    let df = DataFrame::new(columns)?;
    debug!("Loaded record-list table: {:?}", df.shape());
    Ok(LoadOutcome { df, skipped_rows })
}

/// Serialize a table to a JSON array of records.
pub fn write_records(df: &DataFrame) -> Result<Vec<u8>> {
    let records = rows_to_records(df, df.height())?;
    Ok(serde_json::to_vec(&records)?)
}

/// Build one column from the key's value across all rows.
fn build_column(key: &str, rows: &[&serde_json::Map<String, Value>]) -> Column {
    let cells: Vec<Option<&Value>> = rows
        .iter()
        .map(|row| row.get(key).filter(|v| !v.is_null()))
        .collect();

    let all_numeric = cells
        .iter()
        .flatten()
        .all(|v| v.is_number());

    if all_numeric {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| cell.and_then(|v| v.as_f64()))
            .collect();
        Series::new(key.into(), values).into_column()
    } else {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|cell| {
                cell.map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
            })
            .collect();
        Series::new(key.into(), values).into_column()
    }
}
