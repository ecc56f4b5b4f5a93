//! Missing-value handling: row drop, directional fill, and mean imputation.

use crate::error::Result;
use crate::quality::total_nulls;
use crate::utils::{fill_numeric_nulls, numeric_column_names};
use polars::prelude::*;
use tracing::debug;

/// How the `nulos` operation treats missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullMethod {
    /// Remove every row with at least one missing cell.
    Drop,
    /// Fill from the nearest preceding non-missing value, per column.
    Ffill,
    /// Fill from the nearest following non-missing value, per column.
    Bfill,
    /// Fill missing numeric cells with the column mean.
    Mean,
}

impl NullMethod {
    /// Parse a wire-level method tag. Unrecognized tags return `None` and
    /// the operation becomes a recorded no-op.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "drop" => Some(Self::Drop),
            "ffill" => Some(Self::Ffill),
            "bfill" => Some(Self::Bfill),
            "mean" => Some(Self::Mean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Ffill => "ffill",
            Self::Bfill => "bfill",
            Self::Mean => "mean",
        }
    }
}

/// Remove rows containing at least one missing cell. Returns the filtered
/// table and the number of rows removed.
pub fn drop_null_rows(df: &DataFrame) -> Result<(DataFrame, usize)> {
    if df.height() == 0 || df.width() == 0 {
        return Ok((df.clone(), 0));
    }
    let mut mask = BooleanChunked::full("mask".into(), true, df.height());
    for col in df.get_columns() {
        mask = &mask & &col.as_materialized_series().is_not_null();
    }
    let kept = df.filter(&mask)?;
    let removed = df.height() - kept.height();
    debug!("Dropped {} rows with missing cells", removed);
    Ok((kept, removed))
}

/// Fill missing cells from the nearest non-missing value in the given
/// direction, per column. Leading (forward) or trailing (backward) missing
/// cells have no donor and stay missing. Returns the table and the number
/// of cells filled.
pub fn fill_directional(df: &DataFrame, strategy: FillNullStrategy) -> Result<(DataFrame, usize)> {
    let before = total_nulls(df);
    let mut out = df.clone();
    for col in df.get_columns() {
        let series = col.as_materialized_series();
        if series.null_count() == 0 {
            continue;
        }
        let filled = series.fill_null(strategy)?;
        out.replace(series.name().as_str(), filled)?;
    }
    let cells = before - total_nulls(&out);
    debug!("Directional fill modified {} cells", cells);
    Ok((out, cells))
}

/// Fill missing numeric cells with their column's mean over non-missing
/// values. Non-numeric columns are untouched; an all-missing column has no
/// mean and stays as is.
pub fn fill_mean(df: &DataFrame) -> Result<(DataFrame, usize)> {
    let mut out = df.clone();
    let mut cells = 0usize;
    for name in numeric_column_names(df) {
        let series = df.column(&name)?.as_materialized_series();
        let nulls = series.null_count();
        if nulls == 0 {
            continue;
        }
        let Some(mean) = series.mean() else {
            continue;
        };
        let filled = fill_numeric_nulls(series, mean)?;
        out.replace(&name, filled)?;
        cells += nulls;
    }
    debug!("Mean imputation modified {} cells", cells);
    Ok((out, cells))
}
