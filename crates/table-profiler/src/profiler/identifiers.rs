//! Identifier candidate discovery.
//!
//! A second pass over every column with a looser population guard than
//! the classifier's identifier rule: the absolute non-null count is
//! compared against max(10, N/2), which catches key-like columns with
//! many nulls that the classifier's N > 20 rule missed.

use crate::error::Result;
use crate::types::{ClassificationMap, ColumnType};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Uniqueness floor shared with the classifier's identifier rule.
const CANDIDATE_UNIQUE_MIN: f64 = 0.85;
/// Absolute minimum of non-null values regardless of table size.
const CANDIDATE_MIN_NON_NULL: usize = 10;

/// Scan all columns for identifier-like uniqueness, regardless of their
/// classified type.
pub fn candidate_ids(df: &DataFrame) -> Result<Vec<String>> {
    let n = df.height();
    let mut candidates = Vec::new();

    for col in df.get_columns() {
        let series = col.as_materialized_series();
        let non_null = series.drop_nulls();
        let unique_ratio = non_null.n_unique()? as f64 / n.max(1) as f64;
        let population_floor = (n as f64 * 0.5).max(CANDIDATE_MIN_NON_NULL as f64);

        if unique_ratio > CANDIDATE_UNIQUE_MIN && (non_null.len() as f64) > population_floor {
            debug!(
                "Identifier candidate '{}' (unique={:.2}, non_null={})",
                series.name(),
                unique_ratio,
                non_null.len()
            );
            candidates.push(series.name().to_string());
        }
    }

    Ok(candidates)
}

/// Build the ID_Candidates table: classifier-assigned identifier
/// columns first, then this pass's candidates, de-duplicated while
/// preserving order.
pub fn id_candidates(df: &DataFrame, classification: &ClassificationMap) -> Result<DataFrame> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for name in classification.columns_of(ColumnType::Identifier) {
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    for name in candidate_ids(df)? {
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }

    Ok(df!["CandidateID" => names]?)
}
