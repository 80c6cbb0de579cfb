//! Column schema overlaying parsed records.

mod column;
mod table;
mod types;

pub use column::ColumnDescriptor;
pub use table::{Schema, SchemaEdit, SchemaEvent, SchemaListener};
pub use types::ColumnType;
