//! Quality statistics derived from records and schema.
//!
//! Everything here is a pure function of its inputs and always runs over
//! the full record set handed in, never over a display preview.

mod quality;

pub use quality::{column_quality, compute_stats, ColumnQuality, QualityStats};

pub(crate) use quality::duplicate_positions;
