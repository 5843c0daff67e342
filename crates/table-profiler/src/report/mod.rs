//! Report persistence: section naming rules and output sinks.

use crate::error::{ProfilingError, Result, ResultExt};
use crate::types::Report;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Hard cap on a section name including any suffix.
pub const SECTION_NAME_LIMIT: usize = 31;
/// Cap on the column-derived base of a section name.
pub const BASE_NAME_LIMIT: usize = 28;

/// Build a per-column section name of the form `<base><suffix>`.
///
/// The column name is truncated so the whole result fits within
/// [`SECTION_NAME_LIMIT`] characters, and the base never exceeds
/// [`BASE_NAME_LIMIT`] on its own.
pub fn section_name(column: &str, suffix: &str) -> String {
    let budget = BASE_NAME_LIMIT.min(SECTION_NAME_LIMIT.saturating_sub(suffix.chars().count()));
    let base: String = column.chars().take(budget).collect();
    format!("{base}{suffix}")
}

/// Destination for an assembled [`Report`].
pub trait ReportSink {
    /// Persist every section of the report.
    fn persist(&self, report: &Report) -> Result<()>;
}

/// Writes each report section as a CSV file inside one directory.
///
/// The directory is created if absent. Section names become file names
/// (`<section>.csv`) after path-separator characters are replaced.
pub struct CsvDirectorySink {
    dir: PathBuf,
}

impl CsvDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory this sink writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(section: &str) -> String {
        let safe: String = section
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        format!("{safe}.csv")
    }
}

impl ReportSink for CsvDirectorySink {
    fn persist(&self, report: &Report) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(ProfilingError::Io)
            .context(format!(
                "Failed to create report directory {}",
                self.dir.display()
            ))?;

        for (name, table) in report.sections() {
            let path = self.dir.join(Self::file_name(name));
            let file = fs::File::create(&path).map_err(|e| ProfilingError::SinkFailed {
                section: name.clone(),
                reason: e.to_string(),
            })?;

            // CsvWriter needs a mutable frame; the report stays untouched.
            let mut table = table.clone();
            CsvWriter::new(file)
                .include_header(true)
                .finish(&mut table)
                .map_err(|e| ProfilingError::SinkFailed {
                    section: name.clone(),
                    reason: e.to_string(),
                })?;

            debug!("Wrote section '{}' to {}", name, path.display());
        }

        info!(
            "Persisted {} report sections to {}",
            report.len(),
            self.dir.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    // ==================== section_name tests ====================

    #[test]
    fn test_section_name_short_column_untouched() {
        assert_eq!(section_name("Region", "_Top"), "Region_Top");
        assert_eq!(section_name("OrderDate", "_Monthly"), "OrderDate_Monthly");
    }

    #[test]
    fn test_section_name_truncates_long_column() {
        let column = "a".repeat(40);
        let name = section_name(&column, "_Top");
        // "_Top" leaves 27 characters for the base.
        assert_eq!(name, format!("{}_Top", "a".repeat(27)));
        assert!(name.chars().count() <= SECTION_NAME_LIMIT);
    }

    #[test]
    fn test_section_name_longer_suffix_shrinks_base() {
        let column = "a".repeat(40);
        let name = section_name(&column, "_Monthly");
        assert_eq!(name, format!("{}_Monthly", "a".repeat(23)));
        assert_eq!(name.chars().count(), SECTION_NAME_LIMIT);
    }

    #[test]
    fn test_section_name_base_cap_applies_without_suffix() {
        let column = "a".repeat(40);
        let name = section_name(&column, "");
        assert_eq!(name.chars().count(), BASE_NAME_LIMIT);
    }

    #[test]
    fn test_section_name_counts_chars_not_bytes() {
        let column = "é".repeat(40);
        let name = section_name(&column, "_Top");
        assert_eq!(name.chars().count(), SECTION_NAME_LIMIT);
    }

    // ==================== CsvDirectorySink tests ====================

    #[test]
    fn test_sink_writes_one_file_per_section() {
        let dir = std::env::temp_dir().join(format!("tp-sink-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let mut report = Report::new();
        report.push("RawData", df!["x" => [1i64, 2]].unwrap());
        report.push("Outliers", df!["y" => [3i64]].unwrap());

        let sink = CsvDirectorySink::new(&dir);
        sink.persist(&report).unwrap();

        assert!(dir.join("RawData.csv").exists());
        assert!(dir.join("Outliers.csv").exists());

        let raw = std::fs::read_to_string(dir.join("RawData.csv")).unwrap();
        assert!(raw.starts_with("x\n"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_sink_sanitizes_path_separators() {
        assert_eq!(CsvDirectorySink::file_name("a/b\\c"), "a_b_c.csv");
    }
}
