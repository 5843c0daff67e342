//! Top-N value frequency tables for categorical-classified columns.

use crate::error::{ProfilingError, Result};
use crate::utils::string_values;
use polars::prelude::*;
use std::collections::HashMap;

/// Label under which null values are counted.
const MISSING_LABEL: &str = "Missing";

/// Count value frequencies for one column and keep the top `limit` by
/// descending count. Ties preserve first-encounter order.
pub fn top_values(df: &DataFrame, name: &str, limit: usize) -> Result<DataFrame> {
    let col = df
        .column(name)
        .map_err(|_| ProfilingError::ColumnNotFound(name.to_string()))?;
    let values = string_values(col.as_materialized_series())?;

    // (count, first-encounter index) per distinct value.
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for value in values {
        let key = value.unwrap_or_else(|| MISSING_LABEL.to_string());
        let next_index = counts.len();
        let entry = counts.entry(key).or_insert((0, next_index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);

    let labels: Vec<String> = ranked.iter().map(|(v, _, _)| v.clone()).collect();
    let frequencies: Vec<u32> = ranked.iter().map(|(_, c, _)| *c as u32).collect();

    Ok(df![
        "Value" => labels,
        "Count" => frequencies,
    ]?)
}

/// Build one (column name, frequency table) pair per categorical column.
pub fn categorical_summary(
    df: &DataFrame,
    cat_cols: &[String],
    limit: usize,
) -> Result<Vec<(String, DataFrame)>> {
    let mut tables = Vec::with_capacity(cat_cols.len());
    for name in cat_cols {
        tables.push((name.clone(), top_values(df, name, limit)?));
    }
    Ok(tables)
}
