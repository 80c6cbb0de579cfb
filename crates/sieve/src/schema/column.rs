//! Column descriptor.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Editable descriptor overlaying one parsed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Parser-assigned header name; the join key into every record.
    pub original_name: String,
    /// User-facing name. Defaults to `original_name`, need not be unique.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Type hint.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Hidden columns stay in the records but are excluded from views.
    pub visible: bool,
}

impl ColumnDescriptor {
    /// Create a visible descriptor named after its original column.
    pub fn new(original_name: impl Into<String>, column_type: ColumnType) -> Self {
        let original_name = original_name.into();
        Self {
            display_name: original_name.clone(),
            original_name,
            column_type,
            visible: true,
        }
    }

    /// Whether the display name differs from the original name.
    pub fn is_renamed(&self) -> bool {
        self.display_name != self.original_name
    }
}
