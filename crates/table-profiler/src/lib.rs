//! Tabular Data Profiling Library
//!
//! Turns an arbitrary table into a structured profiling report built with Rust and Polars.
//!
//! # Overview
//!
//! This library provides automated table profiling capabilities including:
//!
//! - **Cleaning**: Whitespace trimming and textual-null normalization on string columns
//! - **Type Classification**: Per-column inference into numeric, date, categorical or identifier
//! - **Numeric Summaries**: Count, missing, sum, mean, median, std, min and max per column
//! - **Categorical Summaries**: Top-value frequency tables with explicit missing counts
//! - **Monthly Aggregation**: Calendar-month bucketing of date columns with numeric sums
//! - **Outlier Detection**: IQR-fence flagging with bounded example lists
//! - **Identifier Discovery**: Uniqueness-based candidate key detection
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use table_profiler::{CsvDirectorySink, Profiler, ProfilerConfig, ReportSink};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .try_into_reader_with_file_path(Some("data.csv".into()))?
//!     .finish()?;
//!
//! let config = ProfilerConfig::builder()
//!     .top_values(10)
//!     .max_outlier_examples(5)
//!     .build()?;
//!
//! let report = Profiler::new(config)?.generate(&df)?;
//! CsvDirectorySink::new("reports/data_report").persist(&report)?;
//! ```
//!
//! # Report Shape
//!
//! [`Profiler::generate`] returns a [`Report`]: an ordered list of named
//! sections. Fixed sections (`RawData`, `NumericSummary`,
//! `MissingValues`, `Outliers`, `ID_Candidates`) bracket the per-column
//! ones (`<column>_Top`, `<column>_Monthly`). Any [`ReportSink`] can
//! persist a report; [`CsvDirectorySink`] writes one CSV per section.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod profiler;
pub mod report;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::TableCleaner;
pub use config::{ConfigValidationError, ProfilerConfig, ProfilerConfigBuilder};
pub use error::{ProfilingError, Result as ProfilingResult, ResultExt};
pub use profiler::Profiler;
pub use profiler::classify::{ColumnRatios, classify, classify_columns};
pub use report::{CsvDirectorySink, ReportSink, section_name};
pub use types::{ClassificationMap, ColumnType, OutlierRecord, Report};
pub use utils::{
    clean_numeric_string, is_datetime_dtype, is_numeric_dtype, parse_date_string,
    parse_numeric_string,
};
