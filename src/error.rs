//! Error types for the dataset cleaning pipeline.
//!
//! A single `thiserror` hierarchy covers the load/transform/store boundary.
//! Errors serialize as `{code, message}` so callers embedding the pipeline
//! behind an HTTP surface can forward them directly.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for cleaning runs.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// The declared input format is not one we can parse.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Input bytes could not be decoded as text, even after the
    /// single-byte fallback encoding.
    #[error("Failed to decode input: {0}")]
    Decode(String),

    /// A required request field (dataset id, operation list) is absent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A row did not match the header layout (strict mode only).
    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// An operation referenced a column the table does not have
    /// (strict mode only; silently skipped otherwise).
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A numeric operation was pointed at a non-numeric column
    /// (strict mode only; silently skipped otherwise).
    #[error("Column '{0}' is not numeric")]
    ColumnNotNumeric(String),

    /// The referenced dataset does not exist in the content store.
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable code for callers that dispatch on error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Decode(_) => "DECODE_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::MalformedRow { .. } => "MALFORMED_ROW",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::ColumnNotNumeric(_) => "COLUMN_NOT_NUMERIC",
            Self::DatasetNotFound(_) => "DATASET_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the error should surface as a client error (bad request)
    /// rather than an internal failure.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::UnsupportedFormat(_)
            | Self::Decode(_)
            | Self::MissingField(_)
            | Self::MalformedRow { .. }
            | Self::ColumnNotFound(_)
            | Self::ColumnNotNumeric(_)
            | Self::DatasetNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_client_error(),
            _ => false,
        }
    }
}

/// Errors serialize as `{code, message}` for transport.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CleaningError::UnsupportedFormat("xml".to_string()).error_code(),
            "UNSUPPORTED_FORMAT"
        );
        assert_eq!(
            CleaningError::ColumnNotFound("edad".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_client_error() {
        assert!(CleaningError::MissingField("tipos_limpieza".to_string()).is_client_error());
        assert!(CleaningError::DatasetNotFound("ds/1".to_string()).is_client_error());
        assert!(!CleaningError::InvalidConfig("bad".to_string()).is_client_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = CleaningError::ColumnNotFound("edad".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("edad"));
    }

    #[test]
    fn test_with_context_preserves_code() {
        let error = CleaningError::MalformedRow {
            line: 3,
            expected: 4,
            found: 2,
        }
        .with_context("while loading CSV");
        assert!(error.to_string().contains("while loading CSV"));
        assert_eq!(error.error_code(), "MALFORMED_ROW");
        assert!(error.is_client_error());
    }
}
