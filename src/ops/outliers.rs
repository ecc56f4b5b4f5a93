//! IQR-based outlier row removal.

use crate::error::Result;
use crate::utils::{collect_numeric_values, quantile_lower};
use polars::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Remove rows whose value in any of the given columns falls outside
/// `[Q1 - umbral*IQR, Q3 + umbral*IQR]`. Columns are filtered sequentially,
/// so each column's quartiles are computed over the rows that survived the
/// previous columns. A missing cell fails the bounds test and the row is
/// removed. Returns the filtered table and the total rows removed.
pub fn remove_outliers(df: &DataFrame, columns: &[String], umbral: f64) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let mut current = df.clone();
    for name in columns {
        current = filter_column(&current, name, umbral)?;
    }
    let removed = before - current.height();
    debug!("Outlier filter removed {} rows across {} columns", removed, columns.len());
    Ok((current, removed))
}

fn filter_column(df: &DataFrame, name: &str, umbral: f64) -> Result<DataFrame> {
    let series = df.column(name)?.as_materialized_series();
    let mut values = collect_numeric_values(series)?;
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let (Some(q1), Some(q3)) = (quantile_lower(&values, 0.25), quantile_lower(&values, 0.75))
    else {
        // All-missing column: no quartiles, nothing to bound.
        return Ok(df.clone());
    };
    let iqr = q3 - q1;
    let lower = q1 - umbral * iqr;
    let upper = q3 + umbral * iqr;
    debug!("Column '{}': Q1={}, Q3={}, bounds [{}, {}]", name, q1, q3, lower, upper);

    let floats = series.cast(&DataType::Float64)?;
    let keep: Vec<bool> = floats
        .f64()?
        .into_iter()
        .map(|v| v.is_some_and(|x| x >= lower && x <= upper))
        .collect();
    let mask = BooleanChunked::from_slice("mask".into(), &keep);
    Ok(df.filter(&mask)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_extreme_value_removed() {
        // Q1=2, Q3=4, IQR=2, bounds [-1, 7]: only 100 is outside.
        let df = df!["v" => [1.0, 2.0, 3.0, 4.0, 100.0]].unwrap();
        let cols = vec!["v".to_string()];
        let (filtered, removed) = remove_outliers(&df, &cols, 1.5).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(filtered.height(), 4);
    }

    #[test]
    fn test_two_values_collapse_to_first() {
        // Both quartiles land on the low value, so the bounds collapse to it.
        let df = df!["v" => [1.0, 999.0]].unwrap();
        let cols = vec!["v".to_string()];
        let (filtered, removed) = remove_outliers(&df, &cols, 1.5).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(filtered.height(), 1);
        let v = filtered.column("v").unwrap().f64().unwrap();
        assert_eq!(v.get(0), Some(1.0));
    }

    #[test]
    fn test_missing_cell_row_removed() {
        let df = df!["v" => [Some(1.0), Some(2.0), None, Some(3.0)]].unwrap();
        let cols = vec!["v".to_string()];
        let (filtered, removed) = remove_outliers(&df, &cols, 1.5).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(filtered.column("v").unwrap().null_count(), 0);
    }

    #[test]
    fn test_sequential_columns_use_surviving_rows() {
        let df = df![
            "a" => [1.0, 2.0, 3.0, 4.0, 100.0],
            "b" => [10.0, 10.0, 10.0, 10.0, 10.0],
        ]
        .unwrap();
        let cols = vec!["a".to_string(), "b".to_string()];
        let (filtered, removed) = remove_outliers(&df, &cols, 1.5).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(filtered.height(), 4);
    }

    #[test]
    fn test_all_missing_column_untouched() {
        let df = df!["v" => [None::<f64>, None]].unwrap();
        let cols = vec!["v".to_string()];
        let (filtered, removed) = remove_outliers(&df, &cols, 1.5).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(filtered.height(), 2);
    }
}
