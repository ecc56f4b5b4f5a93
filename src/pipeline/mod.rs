//! Sequential cleaning pipeline.

mod runner;

pub use runner::CleaningPipeline;
