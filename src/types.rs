//! Wire types for cleaning requests, per-operation results, and reports.
//!
//! Field names on the wire keep the original service's Spanish vocabulary
//! (`tipo`, `parametros`, `afectados`, ...) so existing clients keep working.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One entry of the caller-supplied operation list.
///
/// Deserializes from either a bare string (`"duplicados"`) or an object
/// (`{"tipo": "outliers", "parametros": {"umbral": 3.0}}`); a bare string is
/// equivalent to the object form with empty parameters.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OperationRequest {
    /// Operation tag (`duplicados`, `nulos`, `outliers`, `normalizacion`).
    pub tipo: String,
    /// Kind-specific parameters as supplied by the caller.
    pub parametros: Map<String, Value>,
}

impl OperationRequest {
    /// Request with no parameters.
    pub fn bare(tipo: impl Into<String>) -> Self {
        Self {
            tipo: tipo.into(),
            parametros: Map::new(),
        }
    }

    /// Request with explicit parameters.
    pub fn with_params(tipo: impl Into<String>, parametros: Map<String, Value>) -> Self {
        Self {
            tipo: tipo.into(),
            parametros,
        }
    }
}

impl<'de> Deserialize<'de> for OperationRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RequestVisitor;

        impl<'de> Visitor<'de> for RequestVisitor {
            type Value = OperationRequest;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an operation tag string or a {tipo, parametros} object")
            }

            fn visit_str<E>(self, value: &str) -> Result<OperationRequest, E>
            where
                E: de::Error,
            {
                Ok(OperationRequest::bare(value))
            }

            fn visit_map<A>(self, mut map: A) -> Result<OperationRequest, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut tipo: Option<String> = None;
                let mut parametros: Option<Map<String, Value>> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "tipo" => tipo = Some(map.next_value()?),
                        "parametros" => parametros = Some(map.next_value()?),
                        _ => {
                            let _ignored: Value = map.next_value()?;
                        }
                    }
                }
                let tipo = tipo.ok_or_else(|| de::Error::missing_field("tipo"))?;
                Ok(OperationRequest {
                    tipo,
                    parametros: parametros.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(RequestVisitor)
    }
}

/// Outcome of a single applied operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationResult {
    /// Operation tag, echoed as supplied.
    pub tipo: String,
    /// Parameters with defaults materialized (resolved column lists,
    /// resolved `umbral`/`metodo`).
    pub parametros: Map<String, Value>,
    /// Rows removed by the operation. Fill-style operations report 0 here
    /// even when cells changed; see `celdas_modificadas`.
    pub afectados: usize,
    /// Cells rewritten in place by fill/rescale operations. Row-removing
    /// operations report 0 here.
    pub celdas_modificadas: usize,
}

/// Aggregate statistics over a table, computed once over the final state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetStats {
    pub total_filas: usize,
    pub total_columnas: usize,
    /// Total missing cells across all columns.
    pub nulls: usize,
    /// Rows that exactly duplicate an earlier row.
    pub duplicados: usize,
    /// Cumulative rows removed by outlier operations during the run. The
    /// original service hard-coded 0 here; this carries the real count.
    pub outliers: usize,
}

/// Full report of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Per-operation results in execution order.
    pub operaciones: Vec<OperationResult>,
    /// Sum of every operation's `afectados`, zero entries included.
    pub total_afectados: usize,
    /// Aggregate statistics over the final table.
    #[serde(flatten)]
    pub stats: DatasetStats,
    /// First rows of the cleaned table as JSON records.
    pub cleaned_preview: Vec<Map<String, Value>>,
}

/// Catalog record for a completed cleaning run, mirroring the
/// `limpiezas_datos` row the original service inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningRunRecord {
    pub dataset_id: i64,
    pub tipo_limpieza: String,
    pub parametros_usados: Vec<OperationResult>,
    pub num_registros_afectados: usize,
    pub ruta_dataset_limpio: String,
    pub estado: String,
    pub fecha_limpieza: String,
}

/// Response returned to the caller after a successful cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningResponse {
    pub message: String,
    pub limpieza_id: i64,
    pub ruta_dataset_limpio: String,
    pub total_afectados: usize,
    pub operaciones: Vec<OperationResult>,
    pub cleaned_preview: Vec<Map<String, Value>>,
    #[serde(flatten)]
    pub stats: DatasetStats,
    /// Input rows skipped during load (malformed lines / non-record
    /// entries). Always reported, never silently dropped.
    pub filas_descartadas: usize,
}
