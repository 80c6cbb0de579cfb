//! Table-level schema: the ordered, editable list of column descriptors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::column::ColumnDescriptor;
use super::types::ColumnType;
use crate::error::SieveError;
use crate::input::FieldScope;

/// A single edit to a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SchemaEdit {
    Rename {
        original_name: String,
        display_name: String,
    },
    Hide {
        original_name: String,
    },
    Retype {
        original_name: String,
        column_type: ColumnType,
    },
}

impl SchemaEdit {
    pub fn original_name(&self) -> &str {
        match self {
            SchemaEdit::Rename { original_name, .. }
            | SchemaEdit::Hide { original_name }
            | SchemaEdit::Retype { original_name, .. } => original_name,
        }
    }
}

/// An edit that changed the schema, tagged with the resulting revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEvent {
    pub revision: u64,
    pub edit: SchemaEdit,
}

/// Receives schema changes.
pub trait SchemaListener: Send + Sync {
    fn on_schema_change(&self, event: &SchemaEvent, columns: &[ColumnDescriptor]);
}

impl<F> SchemaListener for F
where
    F: Fn(&SchemaEvent, &[ColumnDescriptor]) + Send + Sync,
{
    fn on_schema_change(&self, event: &SchemaEvent, columns: &[ColumnDescriptor]) {
        self(event, columns)
    }
}

/// Ordered column descriptors. Original names are unique.
///
/// Serialized as the bare descriptor array; the revision counter is not
/// persisted and does not take part in equality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnDescriptor>", into = "Vec<ColumnDescriptor>")]
pub struct Schema {
    columns: Vec<ColumnDescriptor>,
    revision: u64,
}

impl Schema {
    /// Create a schema, rejecting repeated original names.
    pub fn from_columns(columns: Vec<ColumnDescriptor>) -> Result<Self, SieveError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.original_name.as_str()) {
                return Err(SieveError::DuplicateColumn(column.original_name.clone()));
            }
        }
        Ok(Self {
            columns,
            revision: 0,
        })
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Number of effective edits applied since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, original_name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.original_name == original_name)
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_columns().count()
    }

    /// Field scope covering the visible columns, in schema order.
    pub fn field_scope(&self) -> FieldScope {
        FieldScope::Columns(
            self.visible_columns()
                .map(|c| c.original_name.clone())
                .collect(),
        )
    }

    /// Set the display name of a column. Unknown names are ignored.
    pub fn rename(
        &mut self,
        original_name: &str,
        display_name: impl Into<String>,
    ) -> &[ColumnDescriptor] {
        self.apply(SchemaEdit::Rename {
            original_name: original_name.to_string(),
            display_name: display_name.into(),
        });
        &self.columns
    }

    /// Hide a column. There is no way to show it again.
    pub fn hide(&mut self, original_name: &str) -> &[ColumnDescriptor] {
        self.apply(SchemaEdit::Hide {
            original_name: original_name.to_string(),
        });
        &self.columns
    }

    /// Change the type hint of a column without touching any values.
    pub fn retype(&mut self, original_name: &str, column_type: ColumnType) -> &[ColumnDescriptor] {
        self.apply(SchemaEdit::Retype {
            original_name: original_name.to_string(),
            column_type,
        });
        &self.columns
    }

    /// Apply an edit. Returns the event when the schema actually changed.
    pub fn apply(&mut self, edit: SchemaEdit) -> Option<SchemaEvent> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.original_name == edit.original_name())?;

        let changed = match &edit {
            SchemaEdit::Rename { display_name, .. } => {
                let changed = column.display_name != *display_name;
                column.display_name = display_name.clone();
                changed
            }
            SchemaEdit::Hide { .. } => {
                let changed = column.visible;
                column.visible = false;
                changed
            }
            SchemaEdit::Retype { column_type, .. } => {
                let changed = column.column_type != *column_type;
                column.column_type = *column_type;
                changed
            }
        };

        if !changed {
            return None;
        }

        self.revision += 1;
        Some(SchemaEvent {
            revision: self.revision,
            edit,
        })
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for Schema {}

impl TryFrom<Vec<ColumnDescriptor>> for Schema {
    type Error = SieveError;

    fn try_from(columns: Vec<ColumnDescriptor>) -> Result<Self, Self::Error> {
        Schema::from_columns(columns)
    }
}

impl From<Schema> for Vec<ColumnDescriptor> {
    fn from(schema: Schema) -> Self {
        schema.columns
    }
}
