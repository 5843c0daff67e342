//! Descriptive statistics for numeric-classified columns.

use crate::error::{ProfilingError, Result};
use crate::utils::numeric_values;
use polars::prelude::*;

/// Mean of a non-empty slice.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of a non-empty slice.
pub(crate) fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    quantile(&sorted, 0.5)
}

/// Sample standard deviation (n-1 divisor); needs at least two values.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0);
    Some(variance.sqrt())
}

/// Quantile of an already-sorted slice using linear interpolation.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let fraction = position - lower as f64;
    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Build the NumericSummary table: one row per numeric column with
/// Column, Count, Missing, Sum, Mean, Median, Std, Min, Max.
///
/// A column with zero non-null values still gets a row; Sum of an empty
/// column is 0.0 and the remaining statistics are null.
pub fn numeric_summary(df: &DataFrame, numeric_cols: &[String]) -> Result<DataFrame> {
    let mut names = Vec::with_capacity(numeric_cols.len());
    let mut counts: Vec<u32> = Vec::with_capacity(numeric_cols.len());
    let mut missing: Vec<u32> = Vec::with_capacity(numeric_cols.len());
    let mut sums = Vec::with_capacity(numeric_cols.len());
    let mut means = Vec::with_capacity(numeric_cols.len());
    let mut medians = Vec::with_capacity(numeric_cols.len());
    let mut stds = Vec::with_capacity(numeric_cols.len());
    let mut mins = Vec::with_capacity(numeric_cols.len());
    let mut maxs = Vec::with_capacity(numeric_cols.len());

    for name in numeric_cols {
        let col = df
            .column(name)
            .map_err(|_| ProfilingError::ColumnNotFound(name.clone()))?;
        let coerced = numeric_values(col.as_materialized_series())?;
        let non_null: Vec<f64> = coerced.iter().flatten().copied().collect();

        names.push(name.clone());
        counts.push(non_null.len() as u32);
        missing.push((coerced.len() - non_null.len()) as u32);
        sums.push(non_null.iter().sum::<f64>());
        means.push(mean(&non_null));
        medians.push(median(&non_null));
        stds.push(sample_std(&non_null));
        mins.push(non_null.iter().copied().reduce(f64::min));
        maxs.push(non_null.iter().copied().reduce(f64::max));
    }

    Ok(df![
        "Column" => names,
        "Count" => counts,
        "Missing" => missing,
        "Sum" => sums,
        "Mean" => means,
        "Median" => medians,
        "Std" => stds,
        "Min" => mins,
        "Max" => maxs,
    ]?)
}
