//! Backfill missing category keys so every row carries a value for every series.

use crate::models::{Category, Row};
use serde_json::Value;

/// Return a copy of `rows` where each row has every key in `categories`.
///
/// Keys absent from a row are inserted with numeric `0`. Keys that are present are left
/// untouched, even when their value is `null`; only key presence is tested. Row count and
/// order are preserved, and the input is not modified.
pub fn normalize_rows(rows: &[Row], categories: &[Category]) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            let mut out = row.clone();
            for category in categories {
                if !out.contains_key(category) {
                    out.insert(category.clone(), Value::from(0));
                }
            }
            out
        })
        .collect()
}
