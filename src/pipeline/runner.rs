//! The cleaning run orchestrator.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::ops::Operation;
use crate::quality::{compute_stats, rows_to_records};
use crate::types::{CleaningReport, OperationRequest, OperationResult};
use polars::prelude::*;
use static_assertions::assert_impl_all;
use tracing::{debug, info};

/// Runs a list of cleaning operations over a table, strictly in order,
/// each operation seeing its predecessor's output.
#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    config: PipelineConfig,
}

assert_impl_all!(CleaningPipeline: Send);

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl CleaningPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Apply all requested operations and report per-operation and aggregate
    /// results. An empty request list is valid and returns the table
    /// untouched. Every entry, including unknown tags, gets a line in the
    /// report.
    pub fn run(
        &self,
        df: DataFrame,
        requests: &[OperationRequest],
    ) -> Result<(DataFrame, CleaningReport)> {
        info!(
            "Starting cleaning run: {} operations over {} rows x {} columns",
            requests.len(),
            df.height(),
            df.width()
        );

        let mut current = df;
        let mut operaciones = Vec::with_capacity(requests.len());
        let mut total_afectados = 0usize;
        let mut outlier_rows_removed = 0usize;

        for request in requests {
            let operation = Operation::from_request(request, &self.config);
            let outcome = operation.apply(&current, &self.config)?;
            debug!(
                "Operation '{}': {} rows removed, {} cells modified",
                request.tipo, outcome.rows_removed, outcome.cells_modified
            );
            if matches!(operation, Operation::Outliers { .. }) {
                outlier_rows_removed += outcome.rows_removed;
            }
            total_afectados += outcome.rows_removed;
            operaciones.push(OperationResult {
                tipo: request.tipo.clone(),
                parametros: outcome.parametros,
                afectados: outcome.rows_removed,
                celdas_modificadas: outcome.cells_modified,
            });
            current = outcome.df;
        }

        let stats = compute_stats(&current, outlier_rows_removed)?;
        let cleaned_preview = rows_to_records(&current, self.config.preview_rows)?;
        info!(
            "Cleaning run finished: {} rows affected, {} rows remain",
            total_afectados, stats.total_filas
        );

        let report = CleaningReport {
            operaciones,
            total_afectados,
            stats,
            cleaned_preview,
        };
        Ok((current, report))
    }
}
