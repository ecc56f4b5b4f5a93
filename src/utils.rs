//! Shared helpers for the cleaning pipeline.
//!
//! Dtype classification, quantile computation, and null-fill primitives used
//! by several operation kinds.

use polars::prelude::*;
use serde_json::{Value, json};

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Names of all numeric columns, in table order.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric_dtype(col.dtype()))
        .map(|col| col.name().to_string())
        .collect()
}

/// Non-null values of a numeric column as `f64`, in row order.
pub fn collect_numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().flatten().collect())
}

/// Quantile of a sorted slice using the "lower" method: the element at
/// index `floor((n - 1) * q)`. Q1 of `[1,2,3,4,100]` is 2; on two values
/// both quartiles land on the lower one.
pub fn quantile_lower(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = ((sorted.len() - 1) as f64 * q).floor() as usize;
    sorted.get(idx).copied()
}

/// Fill null cells of a numeric series with a constant, returning a
/// `Float64` series. Non-null values are preserved.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let float_series = series.cast(&DataType::Float64)?;
    let filled = float_series
        .f64()?
        .apply(|v| Some(v.unwrap_or(fill_value)));
    Ok(filled.into_series().with_name(series.name().clone()))
}

/// Convert a single cell to its JSON representation for previews.
/// Missing cells map to JSON `null`, never to `0` or `""`.
pub fn any_value_to_json(value: &AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => json!(b),
        AnyValue::String(s) => json!(s),
        AnyValue::StringOwned(s) => json!(s.as_str()),
        AnyValue::Int8(v) => json!(v),
        AnyValue::Int16(v) => json!(v),
        AnyValue::Int32(v) => json!(v),
        AnyValue::Int64(v) => json!(v),
        AnyValue::UInt8(v) => json!(v),
        AnyValue::UInt16(v) => json!(v),
        AnyValue::UInt32(v) => json!(v),
        AnyValue::UInt64(v) => json!(v),
        AnyValue::Float32(v) => json!(v),
        AnyValue::Float64(v) => json!(v),
        other => json!(format!("{}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_numeric_column_names() {
        let df = df![
            "a" => [1.0, 2.0],
            "b" => ["x", "y"],
            "c" => [1i64, 2],
        ]
        .unwrap();
        assert_eq!(numeric_column_names(&df), vec!["a", "c"]);
    }

    #[test]
    fn test_quantile_lower_five_values() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 100.0];
        assert_eq!(quantile_lower(&sorted, 0.25), Some(2.0));
        assert_eq!(quantile_lower(&sorted, 0.75), Some(4.0));
    }

    #[test]
    fn test_quantile_lower_two_values() {
        // Both quartiles land on the first element, so IQR collapses to 0.
        let sorted = [1.0, 999.0];
        assert_eq!(quantile_lower(&sorted, 0.25), Some(1.0));
        assert_eq!(quantile_lower(&sorted, 0.75), Some(1.0));
    }

    #[test]
    fn test_quantile_lower_empty() {
        assert_eq!(quantile_lower(&[], 0.25), None);
    }

    #[test]
    fn test_collect_numeric_values_skips_nulls() {
        let series = Series::new("v".into(), &[Some(1.0), None, Some(3.0)]);
        assert_eq!(collect_numeric_values(&series).unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_fill_numeric_nulls() {
        let series = Series::new("v".into(), &[Some(1.0), None, Some(3.0)]);
        let filled = fill_numeric_nulls(&series, 2.0).unwrap();
        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.get(1).unwrap().try_extract::<f64>().unwrap(), 2.0);
    }

    #[test]
    fn test_any_value_to_json_null_is_null() {
        assert_eq!(any_value_to_json(&AnyValue::Null), Value::Null);
        assert_eq!(any_value_to_json(&AnyValue::Float64(1.5)), json!(1.5));
        assert_eq!(any_value_to_json(&AnyValue::String("x")), json!("x"));
    }
}
