//! IQR-based outlier detection for numeric-classified columns.

use super::numeric::quantile;
use crate::error::{ProfilingError, Result};
use crate::types::OutlierRecord;
use crate::utils::numeric_values;
use polars::prelude::*;
use tracing::debug;

/// Fence multiplier for the IQR rule.
const IQR_FENCE: f64 = 1.5;

/// Detect outliers in each numeric column via the IQR fence.
///
/// Columns with no coercible values are skipped. Flagged values are
/// those strictly outside [Q1 - 1.5*IQR, Q3 + 1.5*IQR]; the first
/// `max_examples` are recorded in encounter order.
pub fn detect_outliers(
    df: &DataFrame,
    numeric_cols: &[String],
    max_examples: usize,
) -> Result<Vec<OutlierRecord>> {
    let mut records = Vec::new();

    for name in numeric_cols {
        let col = df
            .column(name)
            .map_err(|_| ProfilingError::ColumnNotFound(name.clone()))?;
        let coerced = numeric_values(col.as_materialized_series())?;
        let non_null: Vec<f64> = coerced.iter().flatten().copied().collect();
        if non_null.is_empty() {
            continue;
        }

        let mut sorted = non_null.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        // Non-empty by the guard above, so the quantiles exist.
        let Some(q1) = quantile(&sorted, 0.25) else { continue };
        let Some(q3) = quantile(&sorted, 0.75) else { continue };
        let iqr = q3 - q1;
        let lower = q1 - IQR_FENCE * iqr;
        let upper = q3 + IQR_FENCE * iqr;

        let flagged: Vec<f64> = non_null
            .iter()
            .copied()
            .filter(|v| *v < lower || *v > upper)
            .collect();

        debug!(
            "Column '{}': {} outliers outside [{:.4}, {:.4}]",
            name,
            flagged.len(),
            lower,
            upper
        );

        records.push(OutlierRecord {
            column: name.clone(),
            count: flagged.len(),
            examples: flagged.into_iter().take(max_examples).collect(),
        });
    }

    Ok(records)
}

/// Render outlier records as the Outliers result table.
pub fn outlier_table(records: &[OutlierRecord]) -> Result<DataFrame> {
    let columns: Vec<String> = records.iter().map(|r| r.column.clone()).collect();
    let counts: Vec<u32> = records.iter().map(|r| r.count as u32).collect();
    let examples: Vec<String> = records.iter().map(|r| r.render_examples()).collect();

    Ok(df![
        "Column" => columns,
        "Outliers" => counts,
        "Examples" => examples,
    ]?)
}
