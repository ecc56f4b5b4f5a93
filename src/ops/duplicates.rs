//! Exact duplicate row removal.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Drop rows that exactly duplicate an earlier row, keeping the first
/// occurrence and the original row order.
pub fn drop_duplicates(df: &DataFrame) -> Result<(DataFrame, usize)> {
    if df.height() == 0 {
        return Ok((df.clone(), 0));
    }
    let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
    let removed = df.height() - deduped.height();
    debug!("Removed {} duplicate rows", removed);
    Ok((deduped, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_removes_duplicates_keeps_first() {
        let df = df![
            "a" => [1i64, 2, 1, 3],
            "b" => ["x", "y", "x", "z"],
        ]
        .unwrap();
        let (deduped, removed) = drop_duplicates(&df).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(deduped.height(), 3);
        let a = deduped.column("a").unwrap().i64().unwrap();
        assert_eq!(a.get(0), Some(1));
        assert_eq!(a.get(1), Some(2));
        assert_eq!(a.get(2), Some(3));
    }

    #[test]
    fn test_idempotent() {
        let df = df![
            "a" => [1i64, 1, 2],
        ]
        .unwrap();
        let (once, removed_once) = drop_duplicates(&df).unwrap();
        assert_eq!(removed_once, 1);
        let (twice, removed_twice) = drop_duplicates(&once).unwrap();
        assert_eq!(removed_twice, 0);
        assert_eq!(twice.height(), once.height());
    }

    #[test]
    fn test_empty_table() {
        let (out, removed) = drop_duplicates(&DataFrame::empty()).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(out.height(), 0);
    }
}
