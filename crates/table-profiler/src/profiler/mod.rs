//! The profiling pipeline: cleaning, classification, summarization and
//! report assembly.

pub mod categorical;
pub mod classify;
pub mod dates;
pub mod identifiers;
pub mod numeric;
pub mod outliers;

use crate::cleaner::TableCleaner;
use crate::config::ProfilerConfig;
use crate::error::{ProfilingError, Result};
use crate::report::section_name;
use crate::types::{ColumnType, Report};
use polars::prelude::*;
use tracing::info;

/// Drives a full profiling run over one table.
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    /// Create a profiler with the given configuration.
    pub fn new(config: ProfilerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ProfilingError::InvalidConfig(e.to_string()))?;
        Ok(Self { config })
    }

    /// Create a profiler with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: ProfilerConfig::default(),
        }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Run the whole pipeline and assemble the ordered report.
    ///
    /// The input table is never mutated; cleaning happens on a working
    /// copy while the original passes through as the `RawData` section.
    pub fn generate(&self, df: &DataFrame) -> Result<Report> {
        info!("Profiling table: {} rows, {} columns", df.height(), df.width());

        let mut working = df.clone();
        TableCleaner::clean_in_place(&mut working)?;

        let classification = classify::classify_columns(&working)?;
        let numeric_cols = classification.columns_of(ColumnType::Numeric);
        let date_cols = classification.columns_of(ColumnType::Date);
        let cat_cols = classification.columns_of(ColumnType::Categorical);

        let mut report = Report::new();
        report.push("RawData", df.clone());
        report.push("NumericSummary", numeric::numeric_summary(&working, &numeric_cols)?);
        report.push("MissingValues", missing_values(&working)?);

        for (column, table) in
            categorical::categorical_summary(&working, &cat_cols, self.config.top_values)?
        {
            report.push(section_name(&column, "_Top"), table);
        }

        for (column, table) in dates::monthly_summary(&working, &date_cols, &numeric_cols)? {
            report.push(section_name(&column, "_Monthly"), table);
        }

        let records = outliers::detect_outliers(
            &working,
            &numeric_cols,
            self.config.max_outlier_examples,
        )?;
        report.push("Outliers", outliers::outlier_table(&records)?);
        report.push(
            "ID_Candidates",
            identifiers::id_candidates(&working, &classification)?,
        );

        info!("Assembled report with {} sections", report.len());
        Ok(report)
    }
}

/// Per-column null counts over the cleaned table.
fn missing_values(df: &DataFrame) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    let counts: Vec<u32> = df
        .get_columns()
        .iter()
        .map(|c| c.null_count() as u32)
        .collect();

    Ok(df![
        "Column" => names,
        "MissingCount" => counts,
    ]?)
}
