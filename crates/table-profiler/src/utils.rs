//! Shared utilities: permissive parse-or-null coercion and dtype checks.
//!
//! Every coercion here returns an `Option` rather than an error. An
//! unparseable value becomes `None` and simply lowers a ratio or adds
//! to a missing tally downstream.

use crate::error::Result;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a date or datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Datetime(_, _) | DataType::Date)
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Clean a string for numeric parsing by removing formatting characters.
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a string as a numeric value (f64), `None` on failure.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

// Date pattern regexes - compiled once at startup. Each gate maps to
// the chrono formats tried for strings matching it.
static YMD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"));
static DMY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").expect("Invalid regex: MM-DD-YYYY"));
static DATETIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}").expect("Invalid regex: datetime")
});

const YMD_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DMY_FORMATS: [&str; 4] = ["%m-%d-%Y", "%m/%d/%Y", "%d-%m-%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Try to parse a string as a calendar date, `None` on failure.
///
/// Pattern-gated so that plain numbers are never misread as timestamps.
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if YMD_PATTERN.is_match(trimmed) {
        for fmt in YMD_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(date);
            }
        }
    }

    if DMY_PATTERN.is_match(trimmed) {
        for fmt in DMY_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(date);
            }
        }
    }

    if DATETIME_PATTERN.is_match(trimmed) {
        for fmt in DATETIME_FORMATS {
            // Time component may carry fractional seconds; match on the prefix.
            if let Ok(dt) = NaiveDateTime::parse_from_str(&trimmed[..19.min(trimmed.len())], fmt) {
                return Some(dt.date());
            }
        }
    }

    None
}

// =============================================================================
// Column Coercion Utilities
// =============================================================================

// Days from 0001-01-01 (CE) to the 1970-01-01 epoch polars dates count from.
const EPOCH_CE_DAYS: i32 = 719_163;

/// Coerce every cell of a column to f64, null on failure.
pub fn numeric_values(series: &Series) -> Result<Vec<Option<f64>>> {
    if is_numeric_dtype(series.dtype()) {
        let casted = series.cast(&DataType::Float64)?;
        Ok(casted.f64()?.into_iter().collect())
    } else if series.dtype() == &DataType::String {
        Ok(series
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_numeric_string))
            .collect())
    } else {
        Ok(vec![None; series.len()])
    }
}

/// Coerce every cell of a column to a calendar date, null on failure.
pub fn date_values(series: &Series) -> Result<Vec<Option<NaiveDate>>> {
    match series.dtype() {
        DataType::Date => {
            let casted = series.cast(&DataType::Int32)?;
            Ok(casted
                .i32()?
                .into_iter()
                .map(|v| v.and_then(|days| NaiveDate::from_num_days_from_ce_opt(days + EPOCH_CE_DAYS)))
                .collect())
        }
        DataType::Datetime(_, _) => {
            let as_date = series.cast(&DataType::Date)?;
            date_values(&as_date)
        }
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_date_string))
            .collect()),
        _ => Ok(vec![None; series.len()]),
    }
}

/// The string form of every cell, null preserved.
pub fn string_values(series: &Series) -> Result<Vec<Option<String>>> {
    if series.dtype() == &DataType::String {
        return Ok(series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect());
    }

    let mut values = Vec::with_capacity(series.len());
    for i in 0..series.len() {
        let value = match series.get(i)? {
            AnyValue::Null => None,
            AnyValue::String(s) => Some(s.to_string()),
            AnyValue::StringOwned(s) => Some(s.to_string()),
            other => Some(format!("{}", other)),
        };
        values.push(value);
    }
    Ok(values)
}

// =============================================================================
// Tests
// =============================================================================
