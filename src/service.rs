//! The cleaning service: fetch, clean, persist, catalog.
//!
//! Coordinates the pipeline with the storage ports. Nothing is written to
//! the store or the catalog unless the whole run succeeds.

use crate::config::PipelineConfig;
use crate::error::{CleaningError, Result, ResultExt};
use crate::io::{self, FormatHint};
use crate::pipeline::CleaningPipeline;
use crate::storage::{CleaningCatalog, DatasetStore};
use crate::types::{CleaningRunRecord, CleaningResponse, OperationRequest};
use chrono::Utc;
use tracing::info;

/// Path the cleaned dataset is written to: the input's directory-less name
/// prefixed and placed under `clean/`.
pub fn cleaned_path(ruta: &str) -> String {
    let basename = ruta.rsplit('/').next().unwrap_or(ruta);
    format!("clean/clean_multi_{}", basename)
}

/// Runs cleaning jobs end to end against injected storage and catalog
/// backends.
pub struct CleaningService<'a> {
    store: &'a dyn DatasetStore,
    catalog: &'a dyn CleaningCatalog,
    pipeline: CleaningPipeline,
}

impl<'a> CleaningService<'a> {
    pub fn new(
        store: &'a dyn DatasetStore,
        catalog: &'a dyn CleaningCatalog,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            pipeline: CleaningPipeline::new(config),
        }
    }

    /// Clean the dataset stored at `ruta` with the given operation list.
    ///
    /// The operation list must be non-empty. The cleaned dataset is written
    /// back in the input's format under [`cleaned_path`], a run record is
    /// cataloged, and the full report is returned.
    pub fn clean_dataset(
        &self,
        dataset_id: i64,
        ruta: &str,
        format: FormatHint,
        operations: &[OperationRequest],
    ) -> Result<CleaningResponse> {
        if operations.is_empty() {
            return Err(CleaningError::MissingField("operaciones".to_string()));
        }

        info!(
            "Cleaning dataset {} at '{}' with {} operations",
            dataset_id,
            ruta,
            operations.len()
        );

        let bytes = self.store.get(ruta)?;
        let strict = self.pipeline.config().strict;
        let loaded = io::load(&bytes, format, strict).context("Failed to load dataset")?;
        let (cleaned, report) = self.pipeline.run(loaded.df, operations)?;

        let cleaned_bytes = io::write(&cleaned, format).context("Failed to serialize cleaned dataset")?;
        let ruta_limpia = cleaned_path(ruta);
        self.store.put(&ruta_limpia, &cleaned_bytes)?;

        let record = CleaningRunRecord {
            dataset_id,
            tipo_limpieza: "multiple".to_string(),
            parametros_usados: report.operaciones.clone(),
            num_registros_afectados: report.total_afectados,
            ruta_dataset_limpio: ruta_limpia.clone(),
            estado: "Completada".to_string(),
            fecha_limpieza: Utc::now().to_rfc3339(),
        };
        let limpieza_id = self.catalog.record_run(&record)?;
        info!("Cleaning run {} cataloged for dataset {}", limpieza_id, dataset_id);

        Ok(CleaningResponse {
            message: "Limpieza completada correctamente.".to_string(),
            limpieza_id,
            ruta_dataset_limpio: ruta_limpia,
            total_afectados: report.total_afectados,
            operaciones: report.operaciones,
            cleaned_preview: report.cleaned_preview,
            stats: report.stats,
            filas_descartadas: loaded.skipped_rows,
        })
    }
}
