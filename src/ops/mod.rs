//! Cleaning operations and their dispatch.
//!
//! Wire-level operation requests parse into the closed [`Operation`] enum;
//! unknown tags stay representable so they can be recorded in the report as
//! no-ops instead of failing the run.

mod duplicates;
mod normalize;
mod nulls;
mod outliers;

pub use nulls::NullMethod;

use crate::config::PipelineConfig;
use crate::error::{CleaningError, Result};
use crate::types::OperationRequest;
use crate::utils::{is_numeric_dtype, numeric_column_names};
use polars::prelude::*;
use serde_json::{Map, Value, json};
use tracing::warn;

/// A parsed cleaning operation with its parameters resolved against the
/// pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Drop exact duplicate rows, keeping the first occurrence.
    Duplicates,
    /// Handle missing cells. `metodo` is `None` for an unrecognized method
    /// tag, which makes the operation a recorded no-op.
    Nulls {
        metodo: Option<NullMethod>,
        raw_metodo: String,
    },
    /// Remove rows outside the IQR bounds of the given (or all numeric)
    /// columns.
    Outliers {
        columnas: Option<Vec<String>>,
        umbral: f64,
    },
    /// Min-max rescale the given (or all numeric) columns to [0, 1].
    Normalization { columnas: Option<Vec<String>> },
    /// Unrecognized operation tag, recorded and skipped.
    Unknown(String),
}

/// What applying one operation produced.
#[derive(Debug)]
pub struct OperationOutcome {
    pub df: DataFrame,
    /// Rows removed by the operation.
    pub rows_removed: usize,
    /// Cells rewritten in place by fill/rescale operations.
    pub cells_modified: usize,
    /// Parameters with defaults materialized, for the report echo.
    pub parametros: Map<String, Value>,
}

impl Operation {
    /// Parse a wire request. Never fails: unknown tags map to
    /// [`Operation::Unknown`] and defaults come from the configuration.
    pub fn from_request(request: &OperationRequest, config: &PipelineConfig) -> Self {
        match request.tipo.as_str() {
            "duplicados" => Self::Duplicates,
            "nulos" => {
                let raw_metodo = match request.parametros.get("metodo") {
                    None => "drop".to_string(),
                    Some(Value::String(s)) => s.clone(),
                    // A non-string method matches no known tag, so it falls
                    // through to the no-op path with its literal echoed.
                    Some(other) => other.to_string(),
                };
                Self::Nulls {
                    metodo: NullMethod::parse(&raw_metodo),
                    raw_metodo,
                }
            }
            "outliers" => Self::Outliers {
                columnas: string_list(request.parametros.get("columnas")),
                umbral: request
                    .parametros
                    .get("umbral")
                    .and_then(Value::as_f64)
                    .unwrap_or(config.default_umbral),
            },
            "normalizacion" => Self::Normalization {
                columnas: string_list(request.parametros.get("columnas")),
            },
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Apply the operation to a table.
    pub fn apply(&self, df: &DataFrame, config: &PipelineConfig) -> Result<OperationOutcome> {
        match self {
            Self::Duplicates => {
                let (out, removed) = duplicates::drop_duplicates(df)?;
                Ok(OperationOutcome {
                    df: out,
                    rows_removed: removed,
                    cells_modified: 0,
                    parametros: Map::new(),
                })
            }
            Self::Nulls { metodo, raw_metodo } => {
                let mut parametros = Map::new();
                parametros.insert("metodo".to_string(), json!(raw_metodo));
                let (out, rows_removed, cells_modified) = match metodo {
                    Some(NullMethod::Drop) => {
                        let (out, removed) = nulls::drop_null_rows(df)?;
                        (out, removed, 0)
                    }
                    Some(NullMethod::Ffill) => {
                        let (out, cells) =
                            nulls::fill_directional(df, FillNullStrategy::Forward(None))?;
                        (out, 0, cells)
                    }
                    Some(NullMethod::Bfill) => {
                        let (out, cells) =
                            nulls::fill_directional(df, FillNullStrategy::Backward(None))?;
                        (out, 0, cells)
                    }
                    Some(NullMethod::Mean) => {
                        let (out, cells) = nulls::fill_mean(df)?;
                        (out, 0, cells)
                    }
                    None => {
                        warn!("Unrecognized null method '{}', skipping", raw_metodo);
                        (df.clone(), 0, 0)
                    }
                };
                Ok(OperationOutcome {
                    df: out,
                    rows_removed,
                    cells_modified,
                    parametros,
                })
            }
            Self::Outliers { columnas, umbral } => {
                let resolved = resolve_numeric_columns(df, columnas.as_deref(), config.strict)?;
                let mut parametros = Map::new();
                parametros.insert("columnas".to_string(), json!(resolved));
                parametros.insert("umbral".to_string(), json!(umbral));
                let (out, removed) = outliers::remove_outliers(df, &resolved, *umbral)?;
                Ok(OperationOutcome {
                    df: out,
                    rows_removed: removed,
                    cells_modified: 0,
                    parametros,
                })
            }
            Self::Normalization { columnas } => {
                let resolved = resolve_numeric_columns(df, columnas.as_deref(), config.strict)?;
                let mut parametros = Map::new();
                parametros.insert("columnas".to_string(), json!(resolved));
                let (out, cells) = normalize::normalize(df, &resolved)?;
                Ok(OperationOutcome {
                    df: out,
                    rows_removed: 0,
                    cells_modified: cells,
                    parametros,
                })
            }
            Self::Unknown(tag) => {
                warn!("Unknown operation '{}', skipping", tag);
                Ok(OperationOutcome {
                    df: df.clone(),
                    rows_removed: 0,
                    cells_modified: 0,
                    parametros: Map::new(),
                })
            }
        }
    }
}

/// Column names requested as a JSON array of strings, or `None` when absent.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|entries| {
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

/// Resolve the target column list. `None` means every numeric column. A
/// listed column that is absent or non-numeric is skipped with a warning,
/// or an error under strict mode.
fn resolve_numeric_columns(
    df: &DataFrame,
    requested: Option<&[String]>,
    strict: bool,
) -> Result<Vec<String>> {
    let Some(names) = requested else {
        return Ok(numeric_column_names(df));
    };
    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        match df.column(name) {
            Err(_) => {
                if strict {
                    return Err(CleaningError::ColumnNotFound(name.clone()));
                }
                warn!("Column '{}' not found, skipping", name);
            }
            Ok(col) if !is_numeric_dtype(col.dtype()) => {
                if strict {
                    return Err(CleaningError::ColumnNotNumeric(name.clone()));
                }
                warn!("Column '{}' is not numeric, skipping", name);
            }
            Ok(_) => resolved.push(name.clone()),
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_config() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn test_parse_bare_tags() {
        let config = test_config();
        let op = Operation::from_request(&OperationRequest::bare("duplicados"), &config);
        assert_eq!(op, Operation::Duplicates);
        let op = Operation::from_request(&OperationRequest::bare("desconocida"), &config);
        assert_eq!(op, Operation::Unknown("desconocida".to_string()));
    }

    #[test]
    fn test_parse_nulos_defaults_to_drop() {
        let op = Operation::from_request(&OperationRequest::bare("nulos"), &test_config());
        assert_eq!(
            op,
            Operation::Nulls {
                metodo: Some(NullMethod::Drop),
                raw_metodo: "drop".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_outliers_defaults() {
        let op = Operation::from_request(&OperationRequest::bare("outliers"), &test_config());
        assert_eq!(
            op,
            Operation::Outliers {
                columnas: None,
                umbral: 1.5,
            }
        );
    }

    #[test]
    fn test_parse_outliers_with_params() {
        let mut parametros = Map::new();
        parametros.insert("columnas".to_string(), json!(["edad"]));
        parametros.insert("umbral".to_string(), json!(3.0));
        let request = OperationRequest::with_params("outliers", parametros);
        let op = Operation::from_request(&request, &test_config());
        assert_eq!(
            op,
            Operation::Outliers {
                columnas: Some(vec!["edad".to_string()]),
                umbral: 3.0,
            }
        );
    }

    #[test]
    fn test_unknown_operation_is_noop() {
        let df = df!["a" => [1i64, 2]].unwrap();
        let op = Operation::Unknown("zscore".to_string());
        let outcome = op.apply(&df, &test_config()).unwrap();
        assert_eq!(outcome.rows_removed, 0);
        assert_eq!(outcome.df.height(), 2);
    }

    #[test]
    fn test_unknown_null_method_is_noop() {
        let df = df!["a" => [Some(1.0), None]].unwrap();
        let op = Operation::Nulls {
            metodo: None,
            raw_metodo: "interpolate".to_string(),
        };
        let outcome = op.apply(&df, &test_config()).unwrap();
        assert_eq!(outcome.df.height(), 2);
        assert_eq!(outcome.cells_modified, 0);
        assert_eq!(outcome.parametros["metodo"], json!("interpolate"));
    }

    #[test]
    fn test_resolved_columns_echoed() {
        let df = df![
            "edad" => [1.0, 2.0],
            "nombre" => ["a", "b"],
        ]
        .unwrap();
        let op = Operation::Normalization { columnas: None };
        let outcome = op.apply(&df, &test_config()).unwrap();
        assert_eq!(outcome.parametros["columnas"], json!(["edad"]));
    }

    #[test]
    fn test_missing_column_skipped_lenient() {
        let df = df!["a" => [1.0, 2.0]].unwrap();
        let op = Operation::Outliers {
            columnas: Some(vec!["no_existe".to_string()]),
            umbral: 1.5,
        };
        let outcome = op.apply(&df, &test_config()).unwrap();
        assert_eq!(outcome.rows_removed, 0);
        assert_eq!(outcome.parametros["columnas"], json!([]));
    }

    #[test]
    fn test_missing_column_errors_strict() {
        let df = df!["a" => [1.0, 2.0]].unwrap();
        let config = PipelineConfig::builder().strict(true).build().unwrap();
        let op = Operation::Outliers {
            columnas: Some(vec!["no_existe".to_string()]),
            umbral: 1.5,
        };
        let err = op.apply(&df, &config).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_non_numeric_column_errors_strict() {
        let df = df!["t" => ["x", "y"]].unwrap();
        let config = PipelineConfig::builder().strict(true).build().unwrap();
        let op = Operation::Normalization {
            columnas: Some(vec!["t".to_string()]),
        };
        let err = op.apply(&df, &config).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_NUMERIC");
    }
}
