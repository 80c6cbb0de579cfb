//! Type inference for seeding a schema from parsed records.
//!
//! Inference looks at the **first record only**. A column whose first value
//! is null is typed `text` even if every later value is numeric.

mod detect;

pub use detect::{infer_type, is_date, is_numeric_literal};

use crate::error::Result;
use crate::input::RecordSet;
use crate::schema::{ColumnDescriptor, Schema};

/// Build the initial schema for a record set, one descriptor per header.
pub fn infer_schema(set: &RecordSet) -> Result<Schema> {
    let first = set.records.first();
    let columns = set
        .headers
        .iter()
        .map(|header| {
            let sample = first.and_then(|r| r.get(header));
            ColumnDescriptor::new(header.clone(), infer_type(sample))
        })
        .collect();

    Schema::from_columns(columns)
}
