//! Table loading and serialization.
//!
//! Turns raw bytes plus a declared format hint into a DataFrame and back.
//! This module never touches the filesystem or network; byte transport is
//! the caller's concern (see [`crate::storage`]).

mod csv;
mod records;

pub use csv::{load_csv, write_csv};
pub use records::{load_records, write_records};

use crate::error::{CleaningError, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared format of a raw dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FormatHint {
    /// Comma-delimited text with a header row.
    #[default]
    Csv,
    /// JSON array of uniform key-value records.
    JsonRecords,
}

impl FromStr for FormatHint {
    type Err = CleaningError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" | "json-records" => Ok(Self::JsonRecords),
            other => Err(CleaningError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl FormatHint {
    /// Infer the hint from a file name, falling back to CSV.
    pub fn from_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".json") {
            Self::JsonRecords
        } else {
            Self::Csv
        }
    }
}

/// A loaded table together with the number of input rows that were
/// skipped as malformed. The count is always surfaced so the lenient
/// skip policy never silently drops information.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub df: DataFrame,
    pub skipped_rows: usize,
}

/// Parse raw bytes into a table according to the format hint.
///
/// Under `strict`, a malformed row aborts the load instead of being
/// skipped.
pub fn load(bytes: &[u8], hint: FormatHint, strict: bool) -> Result<LoadOutcome> {
    match hint {
        FormatHint::Csv => load_csv(bytes, strict),
        FormatHint::JsonRecords => load_records(bytes, strict),
    }
}

/// Serialize a table back to bytes in the given format.
pub fn write(df: &DataFrame, hint: FormatHint) -> Result<Vec<u8>> {
    match hint {
        FormatHint::Csv => write_csv(df),
        FormatHint::JsonRecords => write_records(df),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hint_parsing() {
        assert_eq!("csv".parse::<FormatHint>().unwrap(), FormatHint::Csv);
        assert_eq!(
            "json-records".parse::<FormatHint>().unwrap(),
            FormatHint::JsonRecords
        );
        assert!("parquet".parse::<FormatHint>().is_err());
    }

    #[test]
    fn test_format_hint_from_path() {
        assert_eq!(FormatHint::from_path("data/ventas.csv"), FormatHint::Csv);
        assert_eq!(
            FormatHint::from_path("data/ventas.JSON"),
            FormatHint::JsonRecords
        );
        assert_eq!(FormatHint::from_path("sin_extension"), FormatHint::Csv);
    }
}
