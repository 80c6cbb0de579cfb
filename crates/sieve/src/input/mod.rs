//! Input parsing and record representation.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{FieldScope, Record, RecordId, RecordSet, SourceMetadata};
