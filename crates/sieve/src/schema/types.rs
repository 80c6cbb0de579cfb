//! Core type definitions for schema representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SieveError;

/// Semantic type of a column.
///
/// A display and export hint only: field values stay as text regardless of
/// the type assigned to their column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Free text (also the fallback for nulls and empty strings).
    #[default]
    Text,
    /// Numeric literals.
    Number,
    /// Exactly `true` or `false`.
    Boolean,
    /// Calendar dates and date-times.
    Date,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ColumnType::Text),
            "number" => Ok(ColumnType::Number),
            "boolean" => Ok(ColumnType::Boolean),
            "date" => Ok(ColumnType::Date),
            other => Err(SieveError::Config(format!("Unknown column type '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_type() {
        assert_eq!("Number".parse::<ColumnType>().unwrap(), ColumnType::Number);
        assert_eq!(" date ".parse::<ColumnType>().unwrap(), ColumnType::Date);
        assert!("integer".parse::<ColumnType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ColumnType::Boolean).unwrap();
        assert_eq!(json, "\"boolean\"");
    }
}
