//! Dataset quality metrics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::input::Record;
use crate::schema::Schema;

/// Quality metrics for a set of records under a schema.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityStats {
    pub row_count: usize,
    /// Visible columns.
    pub column_count: usize,
    /// Null or empty fields across visible columns.
    pub null_count: usize,
    /// Records repeating an earlier record.
    pub duplicate_count: usize,
    /// Share of non-null visible fields, 0–100.
    pub completeness_pct: f64,
    /// Share of first-occurrence records, 0–100.
    pub uniqueness_pct: f64,
}

impl QualityStats {
    /// Assemble stats from raw counts, deriving the percentages.
    pub fn from_counts(
        row_count: usize,
        column_count: usize,
        null_count: usize,
        duplicate_count: usize,
    ) -> Self {
        Self {
            row_count,
            column_count,
            null_count,
            duplicate_count,
            completeness_pct: completeness_pct(null_count, row_count * column_count),
            uniqueness_pct: uniqueness_pct(duplicate_count, row_count),
        }
    }
}

/// Per-column null and distinct-value counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnQuality {
    pub original_name: String,
    pub display_name: String,
    pub null_count: usize,
    /// Distinct non-null values.
    pub distinct_count: usize,
}

/// Compute quality stats over every record and the visible columns.
pub fn compute_stats(records: &[Record], schema: &Schema) -> QualityStats {
    let visible: Vec<&str> = schema
        .visible_columns()
        .map(|c| c.original_name.as_str())
        .collect();

    let null_count = records
        .iter()
        .map(|r| visible.iter().filter(|c| r.is_missing(c)).count())
        .sum();

    let duplicate_count = duplicate_positions(records).len();

    QualityStats::from_counts(records.len(), visible.len(), null_count, duplicate_count)
}

/// Null and distinct counts for each visible column, in schema order.
pub fn column_quality(records: &[Record], schema: &Schema) -> Vec<ColumnQuality> {
    schema
        .visible_columns()
        .map(|column| {
            let mut distinct = HashSet::new();
            let mut null_count = 0;
            for record in records {
                if record.is_missing(&column.original_name) {
                    null_count += 1;
                } else if let Some(value) = record.get(&column.original_name) {
                    distinct.insert(value);
                }
            }
            ColumnQuality {
                original_name: column.original_name.clone(),
                display_name: column.display_name.clone(),
                null_count,
                distinct_count: distinct.len(),
            }
        })
        .collect()
}

/// Positions of records whose canonical key already appeared earlier.
pub(crate) fn duplicate_positions(records: &[Record]) -> Vec<usize> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| !seen.insert(r.canonical_key()))
        .map(|(i, _)| i)
        .collect()
}

fn completeness_pct(null_count: usize, cells: usize) -> f64 {
    if cells == 0 {
        return 100.0;
    }
    (100.0 * (1.0 - null_count as f64 / cells as f64)).clamp(0.0, 100.0)
}

fn uniqueness_pct(duplicate_count: usize, rows: usize) -> f64 {
    if rows == 0 {
        return 100.0;
    }
    (100.0 * (1.0 - duplicate_count as f64 / rows as f64)).clamp(0.0, 100.0)
}
