//! Monthly aggregation for date-classified columns.
//!
//! Each date column is bucketed by calendar year-month. When numeric
//! columns exist their coerced values are summed per bucket; otherwise
//! the table falls back to a per-bucket row count. The bucket key is a
//! function-local vector and never becomes a column in any output.

use crate::error::{ProfilingError, Result};
use crate::utils::{date_values, numeric_values};
use chrono::Datelike;
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Build one (column name, monthly table) pair per date column that
/// has at least one parseable value.
pub fn monthly_summary(
    df: &DataFrame,
    date_cols: &[String],
    numeric_cols: &[String],
) -> Result<Vec<(String, DataFrame)>> {
    let mut tables = Vec::new();

    for name in date_cols {
        let col = df
            .column(name)
            .map_err(|_| ProfilingError::ColumnNotFound(name.clone()))?;
        let parsed = date_values(col.as_materialized_series())?;

        if parsed.iter().all(|d| d.is_none()) {
            debug!("No parseable dates in '{}', skipping monthly summary", name);
            continue;
        }

        // Transient bucket keys, scoped to this call only.
        let keys: Vec<Option<String>> = parsed
            .iter()
            .map(|d| d.map(|d| format!("{:04}-{:02}", d.year(), d.month())))
            .collect();

        let table = match sum_by_month(df, &keys, numeric_cols) {
            Ok(Some(table)) => table,
            Ok(None) => rows_by_month(&keys)?,
            // A numeric column missing from the working table is the one
            // recoverable aggregation failure; fall back to row counts.
            Err(ProfilingError::ColumnNotFound(missing)) => {
                warn!(
                    "Numeric column '{}' unavailable while aggregating '{}'; falling back to row counts",
                    missing, name
                );
                rows_by_month(&keys)?
            }
            Err(e) => return Err(e),
        };

        tables.push((name.clone(), table));
    }

    Ok(tables)
}

/// Sum every numeric column per bucket. Returns `Ok(None)` when there
/// are no numeric columns to aggregate.
fn sum_by_month(
    df: &DataFrame,
    keys: &[Option<String>],
    numeric_cols: &[String],
) -> Result<Option<DataFrame>> {
    if numeric_cols.is_empty() {
        return Ok(None);
    }

    let mut coerced: Vec<(String, Vec<Option<f64>>)> = Vec::with_capacity(numeric_cols.len());
    for name in numeric_cols {
        let col = df
            .column(name)
            .map_err(|_| ProfilingError::ColumnNotFound(name.clone()))?;
        coerced.push((name.clone(), numeric_values(col.as_materialized_series())?));
    }

    // BTreeMap keys are the lexicographically sortable "YYYY-MM" form,
    // so iteration order is already chronological.
    let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (row, key) in keys.iter().enumerate() {
        let Some(key) = key else { continue };
        let sums = buckets
            .entry(key.clone())
            .or_insert_with(|| vec![0.0; coerced.len()]);
        for (i, (_, values)) in coerced.iter().enumerate() {
            if let Some(v) = values[row] {
                sums[i] += v;
            }
        }
    }

    let months: Vec<String> = buckets.keys().cloned().collect();
    let mut columns = vec![Column::new("YearMonth".into(), months)];
    for (i, (name, _)) in coerced.iter().enumerate() {
        let sums: Vec<f64> = buckets.values().map(|s| s[i]).collect();
        columns.push(Column::new(name.as_str().into(), sums));
    }

    Ok(Some(DataFrame::new(columns)?))
}

/// Count rows per bucket.
fn rows_by_month(keys: &[Option<String>]) -> Result<DataFrame> {
    let mut buckets: BTreeMap<String, u32> = BTreeMap::new();
    for key in keys.iter().flatten() {
        *buckets.entry(key.clone()).or_insert(0) += 1;
    }

    let months: Vec<String> = buckets.keys().cloned().collect();
    let counts: Vec<u32> = buckets.values().copied().collect();

    Ok(df![
        "YearMonth" => months,
        "Rows" => counts,
    ]?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rows_fallback_without_numeric_columns() {
        let df = df![
            "when" => ["2024-01-05", "2024-01-10", "2024-01-20", "2024-02-01", "2024-02-15"],
        ]
        .unwrap();

        let tables = monthly_summary(&df, &["when".to_string()], &[]).unwrap();
        assert_eq!(tables.len(), 1);

        let table = &tables[0].1;
        let months: Vec<&str> = table
            .column("YearMonth")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        let rows: Vec<u32> = table
            .column("Rows")
            .unwrap()
            .u32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();

        assert_eq!(months, vec!["2024-01", "2024-02"]);
        assert_eq!(rows, vec![3, 2]);
    }

    #[test]
    fn test_monthly_sums_numeric_columns_per_bucket() {
        let df = df![
            "when" => ["2024-01-05", "2024-01-10", "2024-02-01"],
            "amount" => [Some(10.0f64), None, Some(5.0)],
            "qty" => [1.0f64, 2.0, 3.0],
        ]
        .unwrap();

        let tables = monthly_summary(
            &df,
            &["when".to_string()],
            &["amount".to_string(), "qty".to_string()],
        )
        .unwrap();
        let table = &tables[0].1;

        let names: Vec<&str> = table
            .get_column_names()
            .into_iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(names, vec!["YearMonth", "amount", "qty"]);

        let amounts: Vec<f64> = table
            .column("amount")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        let qtys: Vec<f64> = table
            .column("qty")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();

        assert_eq!(amounts, vec![10.0, 5.0]);
        assert_eq!(qtys, vec![3.0, 3.0]);
    }

    #[test]
    fn test_monthly_skips_unparseable_column() {
        let df = df![
            "when" => ["junk", "garbage", "noise"],
        ]
        .unwrap();

        let tables = monthly_summary(&df, &["when".to_string()], &[]).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_monthly_excludes_unparseable_rows() {
        let df = df![
            "when" => ["2024-01-05", "not a date", "2024-01-10"],
        ]
        .unwrap();

        let tables = monthly_summary(&df, &["when".to_string()], &[]).unwrap();
        let table = &tables[0].1;
        assert_eq!(table.height(), 1);
        let rows: Vec<u32> = table
            .column("Rows")
            .unwrap()
            .u32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(rows, vec![2]);
    }

    #[test]
    fn test_monthly_falls_back_when_numeric_column_missing() {
        let df = df![
            "when" => ["2024-01-05", "2024-02-01"],
        ]
        .unwrap();

        let tables =
            monthly_summary(&df, &["when".to_string()], &["ghost".to_string()]).unwrap();
        let table = &tables[0].1;
        assert!(table.column("Rows").is_ok());
        assert_eq!(table.height(), 2);
    }

    #[test]
    fn test_monthly_sorted_across_years() {
        let df = df![
            "when" => ["2024-01-05", "2023-12-31", "2023-02-01"],
        ]
        .unwrap();

        let tables = monthly_summary(&df, &["when".to_string()], &[]).unwrap();
        let months: Vec<&str> = tables[0]
            .1
            .column("YearMonth")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(months, vec!["2023-02", "2023-12", "2024-01"]);
    }

    #[test]
    fn test_monthly_no_bucket_key_column_in_output() {
        let df = df![
            "when" => ["2024-01-05", "2024-02-01"],
            "amount" => [1.0f64, 2.0],
        ]
        .unwrap();

        let tables =
            monthly_summary(&df, &["when".to_string()], &["amount".to_string()]).unwrap();
        let names: Vec<&str> = tables[0]
            .1
            .get_column_names()
            .into_iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(names, vec!["YearMonth", "amount"]);
        // The source table itself is untouched.
        assert_eq!(df.width(), 2);
    }
}
