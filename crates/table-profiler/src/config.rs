//! Configuration types for the profiling engine.
//!
//! Only output-shape knobs live here. Classification thresholds are
//! fixed constants in [`crate::profiler::classify`] and deliberately
//! have no command surface.

use serde::{Deserialize, Serialize};

/// Configuration for report generation.
///
/// Use [`ProfilerConfig::builder()`] for fluent construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Number of rows kept in each categorical frequency table.
    /// Default: 10
    pub top_values: usize,

    /// Maximum number of example values recorded per outlier column.
    /// Default: 5
    pub max_outlier_examples: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            top_values: 10,
            max_outlier_examples: 5,
        }
    }
}

impl ProfilerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_values == 0 {
            return Err(ConfigValidationError::InvalidTopValues(self.top_values));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top_values: {0} (must be at least 1)")]
    InvalidTopValues(usize),
}

/// Builder for [`ProfilerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ProfilerConfigBuilder {
    top_values: Option<usize>,
    max_outlier_examples: Option<usize>,
}

impl ProfilerConfigBuilder {
    /// Set the number of rows kept in each categorical frequency table.
    pub fn top_values(mut self, n: usize) -> Self {
        self.top_values = Some(n);
        self
    }

    /// Set the maximum number of example values per outlier column.
    pub fn max_outlier_examples(mut self, n: usize) -> Self {
        self.max_outlier_examples = Some(n);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<ProfilerConfig, ConfigValidationError> {
        let defaults = ProfilerConfig::default();
        let config = ProfilerConfig {
            top_values: self.top_values.unwrap_or(defaults.top_values),
            max_outlier_examples: self
                .max_outlier_examples
                .unwrap_or(defaults.max_outlier_examples),
        };
        config.validate()?;
        Ok(config)
    }
}
