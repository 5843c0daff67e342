//! Column type classification by heuristic ratios.
//!
//! The decision policy is a fixed-priority rule list evaluated
//! top-to-bottom, first match wins: date, then numeric, then
//! identifier, with categorical as the fallback. Date and numeric are
//! checked first so that a mostly-numeric column with gaps is never
//! misread as an identifier on uniqueness alone.

use crate::error::Result;
use crate::types::{ClassificationMap, ColumnType};
use crate::utils::{date_values, numeric_values};
use polars::prelude::*;
use tracing::debug;

/// Minimum fraction of date-parseable values for a date column.
pub(crate) const DATE_RATIO_MIN: f64 = 0.6;
/// Minimum fraction of number-parseable values for a numeric column.
pub(crate) const NUMERIC_RATIO_MIN: f64 = 0.6;
/// Uniqueness floor for the identifier rule.
pub(crate) const IDENTIFIER_UNIQUE_MIN: f64 = 0.85;
/// Tables at or below this row count never classify as identifier;
/// tiny samples produce spurious high uniqueness.
pub(crate) const IDENTIFIER_MIN_ROWS: usize = 20;

/// The three heuristic ratios a classification decision is a pure
/// function of, plus the row count guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRatios {
    /// Fraction of values parseable as calendar dates, over max(1, N).
    pub date_ratio: f64,
    /// Fraction of values parseable as real numbers, over max(1, N).
    pub numeric_ratio: f64,
    /// Distinct non-null values over max(1, N).
    pub unique_ratio: f64,
    /// Row count N of the table.
    pub row_count: usize,
}

impl ColumnRatios {
    /// Compute the ratios for one column of the cleaned table.
    pub fn compute(series: &Series) -> Result<Self> {
        let n = series.len().max(1) as f64;

        let dates = date_values(series)?;
        let date_ratio = dates.iter().flatten().count() as f64 / n;

        let numbers = numeric_values(series)?;
        let numeric_ratio = numbers.iter().flatten().count() as f64 / n;

        let distinct = series.drop_nulls().n_unique()?;
        let unique_ratio = distinct as f64 / n;

        Ok(Self {
            date_ratio,
            numeric_ratio,
            unique_ratio,
            row_count: series.len(),
        })
    }
}

fn rule_date(r: &ColumnRatios) -> bool {
    r.date_ratio >= DATE_RATIO_MIN
}

fn rule_numeric(r: &ColumnRatios) -> bool {
    r.numeric_ratio >= NUMERIC_RATIO_MIN
}

fn rule_identifier(r: &ColumnRatios) -> bool {
    r.unique_ratio > IDENTIFIER_UNIQUE_MIN && r.row_count > IDENTIFIER_MIN_ROWS
}

/// Ordered rule list; [`ColumnType::Categorical`] is the fallback when
/// no rule matches.
const RULES: [(fn(&ColumnRatios) -> bool, ColumnType); 3] = [
    (rule_date, ColumnType::Date),
    (rule_numeric, ColumnType::Numeric),
    (rule_identifier, ColumnType::Identifier),
];

/// Classify a column from its ratios. Pure, deterministic, total.
pub fn classify(ratios: &ColumnRatios) -> ColumnType {
    for (predicate, column_type) in RULES {
        if predicate(ratios) {
            return column_type;
        }
    }
    ColumnType::Categorical
}

/// Produce the classification map for every column of the cleaned table.
pub fn classify_columns(df: &DataFrame) -> Result<ClassificationMap> {
    let mut map = ClassificationMap::new();

    for col in df.get_columns() {
        let series = col.as_materialized_series();
        let ratios = ColumnRatios::compute(series)?;
        let column_type = classify(&ratios);

        debug!(
            "Classified '{}' as {} (date={:.2}, numeric={:.2}, unique={:.2})",
            series.name(),
            column_type.display_name(),
            ratios.date_ratio,
            ratios.numeric_ratio,
            ratios.unique_ratio
        );

        map.insert(series.name().to_string(), column_type);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratios(date: f64, numeric: f64, unique: f64, rows: usize) -> ColumnRatios {
        ColumnRatios {
            date_ratio: date,
            numeric_ratio: numeric,
            unique_ratio: unique,
            row_count: rows,
        }
    }

    // ==================== classify rule tests ====================

    #[test]
    fn test_classify_date_at_threshold() {
        assert_eq!(classify(&ratios(0.6, 0.0, 0.1, 100)), ColumnType::Date);
    }

    #[test]
    fn test_classify_date_below_threshold_falls_through() {
        assert_eq!(
            classify(&ratios(0.59, 0.0, 0.1, 100)),
            ColumnType::Categorical
        );
    }

    #[test]
    fn test_classify_numeric_at_threshold() {
        assert_eq!(classify(&ratios(0.0, 0.6, 0.1, 100)), ColumnType::Numeric);
    }

    #[test]
    fn test_classify_date_wins_over_numeric() {
        // Both thresholds met; date is checked first.
        assert_eq!(classify(&ratios(0.7, 0.9, 0.1, 100)), ColumnType::Date);
    }

    #[test]
    fn test_classify_numeric_wins_over_identifier() {
        // A unique numeric key column stays numeric.
        assert_eq!(classify(&ratios(0.0, 1.0, 1.0, 100)), ColumnType::Numeric);
    }

    #[test]
    fn test_classify_identifier_needs_strictly_more_than_085() {
        assert_eq!(
            classify(&ratios(0.0, 0.0, 0.85, 100)),
            ColumnType::Categorical
        );
        assert_eq!(
            classify(&ratios(0.0, 0.0, 0.86, 100)),
            ColumnType::Identifier
        );
    }

    #[test]
    fn test_classify_identifier_guarded_on_small_tables() {
        assert_eq!(
            classify(&ratios(0.0, 0.0, 1.0, 20)),
            ColumnType::Categorical
        );
        assert_eq!(classify(&ratios(0.0, 0.0, 1.0, 21)), ColumnType::Identifier);
    }

    #[test]
    fn test_classify_default_is_categorical() {
        assert_eq!(classify(&ratios(0.0, 0.0, 0.0, 0)), ColumnType::Categorical);
    }

    // ==================== ColumnRatios::compute tests ====================

    #[test]
    fn test_ratios_mostly_numeric_strings() {
        let series = Series::new("v".into(), &["1", "2", "3", "4", "oops"]);
        let r = ColumnRatios::compute(&series).unwrap();
        assert!((r.numeric_ratio - 0.8).abs() < 1e-9);
        assert_eq!(r.date_ratio, 0.0);
        assert_eq!(r.unique_ratio, 1.0);
    }

    #[test]
    fn test_ratios_empty_series_no_division_by_zero() {
        let series: Series = Series::new("v".into(), Vec::<String>::new());
        let r = ColumnRatios::compute(&series).unwrap();
        assert_eq!(r.numeric_ratio, 0.0);
        assert_eq!(r.unique_ratio, 0.0);
        assert_eq!(r.row_count, 0);
    }

    #[test]
    fn test_ratios_unique_counts_non_null_only() {
        let series = Series::new("v".into(), &[Some("a"), Some("a"), None, Some("b")]);
        let r = ColumnRatios::compute(&series).unwrap();
        assert!((r.unique_ratio - 0.5).abs() < 1e-9);
    }

    // ==================== classify_columns tests ====================

    #[test]
    fn test_classify_columns_is_total_and_deterministic() {
        let df = df![
            "when" => ["2024-01-01", "2024-02-01", "2024-03-01"],
            "amount" => [1.0f64, 2.0, 3.0],
            "label" => ["a", "b", "a"],
        ]
        .unwrap();

        let first = classify_columns(&df).unwrap();
        let second = classify_columns(&df).unwrap();

        assert_eq!(first.len(), df.width());
        assert_eq!(first, second);
        assert_eq!(first.get("when"), Some(ColumnType::Date));
        assert_eq!(first.get("amount"), Some(ColumnType::Numeric));
        assert_eq!(first.get("label"), Some(ColumnType::Categorical));
    }

    #[test]
    fn test_classify_columns_identifier_needs_large_table() {
        let values: Vec<String> = (0..30).map(|i| format!("key-{}", i)).collect();
        let df = df!["id" => &values].unwrap();
        let map = classify_columns(&df).unwrap();
        assert_eq!(map.get("id"), Some(ColumnType::Identifier));

        let small: Vec<String> = (0..10).map(|i| format!("key-{}", i)).collect();
        let df = df!["id" => &small].unwrap();
        let map = classify_columns(&df).unwrap();
        assert_eq!(map.get("id"), Some(ColumnType::Categorical));
    }
}
