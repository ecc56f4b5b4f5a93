//! Aggregate quality metrics over a table.
//!
//! Computes the summary statistics reported after a cleaning run and the
//! JSON-record previews of the cleaned table.

use crate::error::Result;
use crate::types::DatasetStats;
use crate::utils::any_value_to_json;
use polars::prelude::*;
use serde_json::{Map, Value};

/// Total missing cells across all columns.
pub fn total_nulls(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}

/// Rows that exactly duplicate an earlier row.
pub fn duplicate_row_count(df: &DataFrame) -> Result<usize> {
    if df.height() == 0 {
        return Ok(0);
    }
    let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
    Ok(df.height() - deduped.height())
}

/// Summary statistics over a table. `outlier_rows_removed` is supplied by
/// the caller since it is a property of the run, not of the final table.
pub fn compute_stats(df: &DataFrame, outlier_rows_removed: usize) -> Result<DatasetStats> {
    Ok(DatasetStats {
        total_filas: df.height(),
        total_columnas: df.width(),
        nulls: total_nulls(df),
        duplicados: duplicate_row_count(df)?,
        outliers: outlier_rows_removed,
    })
}

/// The first `limit` rows as JSON records, in table order. Missing cells
/// map to JSON `null`.
pub fn rows_to_records(df: &DataFrame, limit: usize) -> Result<Vec<Map<String, Value>>> {
    let take = limit.min(df.height());
    let names: Vec<String> = df
        .get_columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();

    let mut records = Vec::with_capacity(take);
    for row_idx in 0..take {
        let mut record = Map::with_capacity(names.len());
        for (col_idx, name) in names.iter().enumerate() {
            let cell = df.get_columns()[col_idx]
                .as_materialized_series()
                .get(row_idx)?;
            record.insert(name.clone(), any_value_to_json(&cell));
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_total_nulls() {
        let df = df![
            "a" => [Some(1.0), None, Some(3.0)],
            "b" => [None::<&str>, None, Some("x")],
        ]
        .unwrap();
        assert_eq!(total_nulls(&df), 3);
    }

    #[test]
    fn test_duplicate_row_count() {
        let df = df![
            "a" => [1i64, 1, 2, 1],
            "b" => ["x", "x", "y", "x"],
        ]
        .unwrap();
        assert_eq!(duplicate_row_count(&df).unwrap(), 2);
    }

    #[test]
    fn test_duplicate_row_count_empty() {
        let df = DataFrame::empty();
        assert_eq!(duplicate_row_count(&df).unwrap(), 0);
    }

    #[test]
    fn test_compute_stats() {
        let df = df![
            "a" => [Some(1.0), Some(1.0), None],
            "b" => ["x", "x", "y"],
        ]
        .unwrap();
        let stats = compute_stats(&df, 4).unwrap();
        assert_eq!(stats.total_filas, 3);
        assert_eq!(stats.total_columnas, 2);
        assert_eq!(stats.nulls, 1);
        assert_eq!(stats.duplicados, 1);
        assert_eq!(stats.outliers, 4);
    }

    #[test]
    fn test_rows_to_records_limit_and_nulls() {
        let df = df![
            "a" => [Some(1.0), None, Some(3.0)],
            "b" => ["x", "y", "z"],
        ]
        .unwrap();
        let records = rows_to_records(&df, 2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["a"], json!(1.0));
        assert_eq!(records[1]["a"], Value::Null);
        assert_eq!(records[1]["b"], json!("y"));
    }

    #[test]
    fn test_rows_to_records_limit_beyond_height() {
        let df = df!["a" => [1i64]].unwrap();
        assert_eq!(rows_to_records(&df, 10).unwrap().len(), 1);
    }
}
