//! Full-text search over in-memory records.

mod filter;

pub use filter::{SearchFilter, PREVIEW_LIMIT};
