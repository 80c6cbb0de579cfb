//! The frozen handoff artifact passed to the next pipeline stage.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::Record;
use crate::schema::Schema;
use crate::stats::QualityStats;
use crate::transform::{CleaningResult, OperationId};

/// One exported row: display name → value, visible columns only.
pub type Row = IndexMap<String, Option<String>>;

/// Whole-dataset snapshot as written to a snapshot store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub rows: Vec<Row>,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub column_count: usize,
    pub null_values: usize,
    pub duplicates: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_methods: Option<Vec<OperationId>>,
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Freeze records under a schema: visible columns only, in schema order,
    /// keyed by display name.
    pub fn capture(records: &[Record], schema: &Schema, stats: &QualityStats) -> Self {
        let keys = export_keys(schema);
        let rows: Vec<Row> = records
            .iter()
            .map(|record| {
                keys.iter()
                    .map(|(original, key)| {
                        (key.clone(), record.get(original).map(|v| v.to_string()))
                    })
                    .collect()
            })
            .collect();

        Self {
            file_name: None,
            row_count: rows.len(),
            column_count: keys.len(),
            headers: keys.into_iter().map(|(_, key)| key).collect(),
            rows,
            null_values: stats.null_count,
            duplicates: stats.duplicate_count,
            schema: Some(schema.clone()),
            cleaned: None,
            cleaning_methods: None,
            timestamp: Utc::now(),
        }
    }

    /// Freeze the retained records of a cleaning pass.
    pub fn from_cleaning(result: &CleaningResult, schema: &Schema) -> Self {
        let mut snapshot = Self::capture(&result.retained, schema, &result.stats);
        snapshot.cleaned = Some(true);
        snapshot.cleaning_methods = Some(result.applied.clone());
        snapshot
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn is_cleaned(&self) -> bool {
        self.cleaned.unwrap_or(false)
    }
}

/// Pair each visible column with a unique export key.
///
/// Display names may repeat; later repeats get `_2`, `_3`, ... so no
/// column overwrites another in an exported row.
fn export_keys(schema: &Schema) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    schema
        .visible_columns()
        .map(|column| {
            let mut key = column.display_name.clone();
            let mut n = 2;
            while !seen.insert(key.clone()) {
                key = format!("{}_{}", column.display_name, n);
                n += 1;
            }
            (column.original_name.clone(), key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_schema;
    use crate::input::Parser;
    use crate::stats::compute_stats;
    use crate::transform::{CleaningEngine, OperationSet};

    #[test]
    fn test_capture_renames_and_hides() {
        let set = Parser::new().parse_str("a,b,c\n1,2,3\n4,,6\n").unwrap();
        let mut schema = infer_schema(&set).unwrap();
        schema.rename("a", "Column A");
        schema.hide("b");
        let stats = compute_stats(&set.records, &schema);

        let snapshot = Snapshot::capture(&set.records, &schema, &stats);

        assert_eq!(snapshot.headers, vec!["Column A", "c"]);
        assert_eq!(snapshot.row_count, 2);
        assert_eq!(snapshot.column_count, 2);
        assert_eq!(snapshot.null_values, 0);
        assert_eq!(snapshot.rows[1].get("Column A"), Some(&Some("4".to_string())));
        assert!(!snapshot.rows[0].contains_key("b"));
        assert!(!snapshot.is_cleaned());
        // Records themselves keep every field.
        assert_eq!(set.records[0].get("b"), Some("2"));
    }

    #[test]
    fn test_repeated_display_names_get_distinct_keys() {
        let set = Parser::new().parse_str("a,b\n1,2\n").unwrap();
        let mut schema = infer_schema(&set).unwrap();
        schema.rename("a", "x");
        schema.rename("b", "x");
        let stats = compute_stats(&set.records, &schema);

        let snapshot = Snapshot::capture(&set.records, &schema, &stats);
        assert_eq!(snapshot.headers, vec!["x", "x_2"]);
        assert_eq!(snapshot.rows[0].get("x_2"), Some(&Some("2".to_string())));
    }

    #[test]
    fn test_json_field_names() {
        let set = Parser::new().parse_str("a,b\n1,2\n1,2\n3,\n").unwrap();
        let schema = infer_schema(&set).unwrap();
        let result = CleaningEngine::new().clean(
            &set.records,
            &OperationSet::parse(&["remove-na", "remove-duplicates"]).unwrap(),
        );

        let snapshot = Snapshot::from_cleaning(&result, &schema).with_file_name("data.csv");
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["rowCount"], 1);
        assert_eq!(json["nullValues"], 1);
        assert_eq!(json["duplicates"], 1);
        assert_eq!(json["cleaned"], true);
        assert_eq!(json["cleaningMethods"][0], "remove-na");
        assert_eq!(json["fileName"], "data.csv");
        assert_eq!(json["schema"][0]["originalName"], "a");
        assert_eq!(json["rows"][0]["b"], "2");

        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
