//! Multi-step tabular dataset cleaning pipeline.
//!
//! Loads delimited-text or JSON record-list datasets into Polars frames and
//! applies an ordered list of cleaning operations:
//!
//! - **duplicados**: exact duplicate row removal (keep first)
//! - **nulos**: missing-value handling (`drop`, `ffill`, `bfill`, `mean`)
//! - **outliers**: IQR-based row filtering per numeric column
//! - **normalizacion**: min-max rescaling of numeric columns to [0, 1]
//!
//! Each run reports per-operation affected-row counts, aggregate statistics
//! over the final table, and a row preview. Unknown operation tags are
//! recorded as no-ops rather than failing the run.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use limpia::{CleaningPipeline, OperationRequest, PipelineConfig, io};
//!
//! let bytes = std::fs::read("ventas.csv")?;
//! let loaded = io::load(&bytes, io::FormatHint::Csv, false)?;
//!
//! let requests = vec![
//!     OperationRequest::bare("duplicados"),
//!     OperationRequest::bare("outliers"),
//! ];
//! let pipeline = CleaningPipeline::new(PipelineConfig::default());
//! let (cleaned, report) = pipeline.run(loaded.df, &requests)?;
//!
//! println!("{} rows affected", report.total_afectados);
//! ```
//!
//! The [`service::CleaningService`] wraps the pipeline with injected storage
//! and catalog backends for end-to-end clean-and-persist runs.

pub mod config;
pub mod error;
pub mod io;
pub mod ops;
pub mod pipeline;
pub mod quality;
pub mod service;
pub mod storage;
pub mod types;
pub mod utils;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{CleaningError, Result, ResultExt};
pub use io::{FormatHint, LoadOutcome};
pub use ops::{NullMethod, Operation};
pub use pipeline::CleaningPipeline;
pub use service::CleaningService;
pub use storage::{CleaningCatalog, DatasetStore, FsStore, InMemoryCatalog, InMemoryStore};
pub use types::{
    CleaningReport, CleaningResponse, CleaningRunRecord, DatasetStats, OperationRequest,
    OperationResult,
};
