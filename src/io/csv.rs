//! Delimited-text loading and writing.
//!
//! Decoding tries UTF-8 first and falls back to WINDOWS-1252, matching the
//! latin-1 fallback of the original ingest path. Rows whose field count does
//! not match the header are skipped and counted (or rejected under strict).

use super::LoadOutcome;
use crate::error::{CleaningError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::borrow::Cow;
use std::io::Cursor;
use tracing::{debug, warn};

/// Parse CSV bytes with a header row into a table.
pub fn load_csv(bytes: &[u8], strict: bool) -> Result<LoadOutcome> {
    let text = decode_text(bytes)?;
    let (cleaned, skipped_rows) = filter_malformed_rows(&text, strict)?;

    if skipped_rows > 0 {
        warn!("Skipped {} malformed CSV rows", skipped_rows);
    }

    // The reader treats fully empty input as an error; an empty dataset is
    // a valid (if useless) cleaning target.
    if cleaned.is_empty() {
        return Ok(LoadOutcome {
            df: DataFrame::empty(),
            skipped_rows,
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .with_ignore_errors(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()?;

    debug!("Loaded CSV table: {:?}", df.shape());
    Ok(LoadOutcome { df, skipped_rows })
}

/// Serialize a table to CSV bytes, header row included.
pub fn write_csv(df: &DataFrame) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut df = df.clone();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut df)?;
    Ok(buf)
}

/// Decode bytes as UTF-8, retrying once with the single-byte fallback
/// encoding before giving up.
fn decode_text(bytes: &[u8]) -> Result<String> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Ok(s.to_string());
    }

    debug!("Input is not valid UTF-8, retrying as WINDOWS-1252");
    let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
    if had_errors {
        return Err(CleaningError::Decode(
            "input is neither valid UTF-8 nor WINDOWS-1252".to_string(),
        ));
    }
    Ok(match decoded {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    })
}

/// Keep only rows whose field count matches the header, returning the
/// surviving text and the number of dropped rows.
fn filter_malformed_rows(text: &str, strict: bool) -> Result<(String, usize)> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok((String::new(), 0));
    };
    let expected = field_count(header);

    let mut kept = vec![header];
    let mut skipped = 0usize;
    for (idx, line) in lines {
        let found = field_count(line);
        if found == expected {
            kept.push(line);
        } else if strict {
            return Err(CleaningError::MalformedRow {
                line: idx + 1,
                expected,
                found,
            });
        } else {
            skipped += 1;
        }
    }

    Ok((kept.join("\n"), skipped))
}

/// Count fields in a CSV line, ignoring commas inside double quotes.
fn field_count(line: &str) -> usize {
    let mut count = 1;
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => count += 1,
            _ => {}
        }
    }
    count
}
