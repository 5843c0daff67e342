//! Custom error types for the profiling engine.
//!
//! Parse-level failures are never errors: permissive coercion yields
//! `None` and the caller counts the value as missing. The variants here
//! cover the genuinely fatal paths (I/O, polars internals, a summarizer
//! asked about a column that does not exist).

use thiserror::Error;

/// The main error type for report generation.
#[derive(Error, Debug)]
pub enum ProfilingError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A report section could not be persisted.
    #[error("Failed to persist report section '{section}': {reason}")]
    SinkFailed { section: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProfilingError>,
    },
}

impl ProfilingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProfilingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfilingError>;

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
        self.map_err(|e| ProfilingError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_preserves_source() {
        let error = ProfilingError::ColumnNotFound("Amount".to_string())
            .with_context("During numeric summary");
        assert!(error.to_string().contains("During numeric summary"));
        assert!(error.to_string().contains("Amount"));
    }

    #[test]
    fn test_result_ext_on_polars_result() {
        let result: std::result::Result<(), polars::error::PolarsError> = Err(
            polars::error::PolarsError::ComputeError("boom".into()),
        );
        let err = result.context("while grouping").unwrap_err();
        assert!(err.to_string().contains("while grouping"));
    }

    #[test]
    fn test_sink_failed_display() {
        let err = ProfilingError::SinkFailed {
            section: "Outliers".to_string(),
            reason: "disk full".to_string(),
        };
        assert!(err.to_string().contains("Outliers"));
        assert!(err.to_string().contains("disk full"));
    }
}
