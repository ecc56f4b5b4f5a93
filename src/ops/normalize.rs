//! Min-max rescaling of numeric columns to [0, 1].

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Rescale each given column to [0, 1] with `(v - min) / (max - min)` over
/// its non-missing values. A constant column (min == max) is left unchanged
/// and missing cells stay missing. Returns the table and the number of
/// non-missing cells rescaled.
pub fn normalize(df: &DataFrame, columns: &[String]) -> Result<(DataFrame, usize)> {
    let mut out = df.clone();
    let mut cells = 0usize;
    for name in columns {
        let series = out.column(name)?.as_materialized_series().clone();
        let floats = series.cast(&DataType::Float64)?;
        let ca = floats.f64()?;
        let (Some(min), Some(max)) = (ca.min(), ca.max()) else {
            continue;
        };
        if max == min {
            debug!("Column '{}' is constant, skipping rescale", name);
            continue;
        }
        let range = max - min;
        let rescaled = ca.apply(|v| v.map(|x| (x - min) / range));
        out.replace(name, rescaled.into_series().with_name(series.name().clone()))?;
        cells += series.len() - series.null_count();
        debug!("Rescaled column '{}' to [0, 1]", name);
    }
    Ok((out, cells))
}
