//! Configuration for the cleaning pipeline.
//!
//! Built with the builder pattern and validated on construction.

use serde::{Deserialize, Serialize};

/// Default IQR multiplier for the outlier filter, matching pandas' common
/// 1.5×IQR fence.
pub const DEFAULT_OUTLIER_UMBRAL: f64 = 1.5;

/// Default number of rows included in `cleaned_preview`.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Configuration for a [`CleaningPipeline`](crate::CleaningPipeline).
///
/// # Example
///
/// ```rust,ignore
/// use limpia::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .strict(true)
///     .preview_rows(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fail-fast mode. When true, malformed input rows and unknown or
    /// wrongly typed operation columns are errors; when false they are
    /// skipped and counted.
    /// Default: false
    pub strict: bool,

    /// Number of rows of the cleaned table echoed back in the report.
    /// Default: 10
    pub preview_rows: usize,

    /// IQR multiplier used when an outliers operation omits `umbral`.
    /// Default: 1.5
    pub default_umbral: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strict: false,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            default_umbral: DEFAULT_OUTLIER_UMBRAL,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.default_umbral.is_finite() || self.default_umbral < 0.0 {
            return Err(ConfigValidationError::InvalidUmbral(self.default_umbral));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid default umbral: {0} (must be finite and non-negative)")]
    InvalidUmbral(f64),
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    strict: Option<bool>,
    preview_rows: Option<usize>,
    default_umbral: Option<f64>,
}

impl PipelineConfigBuilder {
    /// Enable or disable fail-fast handling of malformed rows and
    /// unknown/wrongly-typed columns.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Set the number of preview rows in the report.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the IQR multiplier used when an outliers operation omits `umbral`.
    pub fn default_umbral(mut self, umbral: f64) -> Self {
        self.default_umbral = Some(umbral);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            strict: self.strict.unwrap_or(false),
            preview_rows: self.preview_rows.unwrap_or(DEFAULT_PREVIEW_ROWS),
            default_umbral: self.default_umbral.unwrap_or(DEFAULT_OUTLIER_UMBRAL),
        };
        config.validate()?;
        Ok(config)
    }
}
