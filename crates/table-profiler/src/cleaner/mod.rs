//! Text normalization applied before classification and summarization.
//!
//! The cleaner mutates the working table exactly once, in place. The
//! raw table is preserved separately by the assembler for the RawData
//! passthrough section.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Textual null marker converted to an explicit null. Exact match after
/// trimming, case-sensitive.
const NULL_TOKEN: &str = "nan";

/// Table cleaner for textual column normalization.
pub struct TableCleaner;

impl TableCleaner {
    /// Trim whitespace and unify the null representation across all
    /// string columns of `df`, in place.
    ///
    /// Non-string columns pass through unmodified. Returns the number
    /// of values converted to null.
    pub fn clean_in_place(df: &mut DataFrame) -> Result<usize> {
        let column_names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut nulled = 0;

        for col_name in &column_names {
            let col = df.column(col_name)?;
            let series = col.as_materialized_series();
            if series.dtype() != &DataType::String {
                continue;
            }

            let str_series = series.str()?;
            let mut cleaned_values = Vec::with_capacity(str_series.len());

            for opt_val in str_series.into_iter() {
                match opt_val {
                    Some(val) => {
                        let trimmed = val.trim();
                        if trimmed == NULL_TOKEN {
                            cleaned_values.push(None);
                            nulled += 1;
                        } else {
                            cleaned_values.push(Some(trimmed.to_string()));
                        }
                    }
                    None => cleaned_values.push(None),
                }
            }

            let cleaned_series = Series::new(col_name.as_str().into(), cleaned_values);
            df.replace(col_name, cleaned_series)?;
        }

        if nulled > 0 {
            debug!("Converted {} '{}' tokens to null", nulled, NULL_TOKEN);
        }

        Ok(nulled)
    }
}
