//! Domain types shared across the profiling pipeline.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Category assigned to a column by the type classifier.
///
/// Classification is total and mutually exclusive: every column
/// receives exactly one of these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Mostly number-parseable values.
    Numeric,
    /// Mostly date-parseable values.
    Date,
    /// Default bucket for everything else.
    Categorical,
    /// High-uniqueness column that looks like a key.
    Identifier,
}

impl ColumnType {
    /// Get a human-readable display name for the column type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::Categorical => "categorical",
            Self::Identifier => "identifier",
        }
    }
}

/// Mapping from column name to [`ColumnType`], preserving the dataset's
/// column order.
///
/// Produced once per run from the cleaned table and consumed read-only
/// by every summarizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationMap {
    entries: Vec<(String, ColumnType)>,
}

impl ClassificationMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, column_type: ColumnType) {
        self.entries.push((name.into(), column_type));
    }

    /// Look up the type assigned to a column.
    pub fn get(&self, name: &str) -> Option<ColumnType> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| *t)
    }

    /// Names of all columns assigned the given type, in dataset order.
    pub fn columns_of(&self, column_type: ColumnType) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, t)| *t == column_type)
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// Iterate over all (name, type) entries in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-column outlier findings: flagged count plus a bounded sample of
/// the flagged values in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierRecord {
    pub column: String,
    pub count: usize,
    pub examples: Vec<f64>,
}

impl OutlierRecord {
    /// Human-readable rendering of the example list.
    pub fn render_examples(&self) -> String {
        format!("{:?}", self.examples)
    }
}

/// The assembled report: an ordered collection of named result tables.
///
/// Section order is significant for output and matches the assembly
/// order (`RawData` first, `ID_Candidates` last). Sections are never
/// mutated after being pushed.
#[derive(Debug, Clone, Default)]
pub struct Report {
    sections: Vec<(String, DataFrame)>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named section.
    pub fn push(&mut self, name: impl Into<String>, table: DataFrame) {
        self.sections.push((name.into(), table));
    }

    /// All sections in assembly order.
    pub fn sections(&self) -> &[(String, DataFrame)] {
        &self.sections
    }

    /// Look up a section by name.
    pub fn get(&self, name: &str) -> Option<&DataFrame> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    /// Section names in assembly order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
