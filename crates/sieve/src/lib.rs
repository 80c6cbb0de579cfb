//! Sieve: a tabular data engine for preparing delimited datasets.
//!
//! Sieve imports delimited text, infers a column schema, lets the caller
//! edit that schema, applies cleaning passes, searches the rows and
//! reports quality statistics before handing a frozen snapshot to the next
//! stage of a pipeline.
//!
//! # Core Principles
//!
//! - **Non-destructive**: parsed records are never modified; cleaning
//!   produces a new retained view plus a set of removal marks
//! - **Stable identity**: every record keeps the id it was parsed with
//! - **Explicit stores**: persistence goes through handles passed in by
//!   the caller
//!
//! # Example
//!
//! ```no_run
//! use sieve::{OperationSet, Workbench};
//!
//! let mut bench = Workbench::new();
//! bench.load_file("measurements.csv").unwrap();
//! bench.hide("notes");
//!
//! let ops = OperationSet::parse(&["remove-na", "remove-duplicates"]).unwrap();
//! let result = bench.clean(&ops);
//! println!("Removed: {}", result.removal_set.len());
//! println!("Completeness: {:.1}%", bench.stats().completeness_pct);
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod persistence;
pub mod schema;
pub mod search;
pub mod stats;
pub mod transform;

mod workbench;

pub use crate::workbench::{Workbench, WorkbenchConfig};
pub use error::{Result, SieveError};
pub use inference::{infer_schema, infer_type};
pub use input::{Parser, ParserConfig, Record, RecordId, RecordSet, SourceMetadata};
pub use persistence::{PersistenceBridge, Snapshot};
pub use schema::{ColumnDescriptor, ColumnType, Schema};
pub use search::SearchFilter;
pub use stats::{compute_stats, QualityStats};
pub use transform::{CleaningEngine, CleaningResult, OperationId, OperationSet, RemovalSet};
