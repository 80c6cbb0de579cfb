//! Workbench: one editing session over a loaded dataset.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::inference::infer_schema;
use crate::input::{Parser, ParserConfig, Record, RecordSet, SourceMetadata};
use crate::persistence::Snapshot;
use crate::schema::{ColumnDescriptor, ColumnType, Schema, SchemaEdit, SchemaEvent, SchemaListener};
use crate::search::{SearchFilter, PREVIEW_LIMIT};
use crate::stats::{column_quality, compute_stats, ColumnQuality, QualityStats};
use crate::transform::{CleaningEngine, CleaningResult, OperationSet};

/// Configuration for a workbench session.
#[derive(Debug, Clone)]
pub struct WorkbenchConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Records returned for a blank search.
    pub preview_limit: usize,
    /// Check only visible columns when removing rows with nulls.
    pub scope_cleaning_to_schema: bool,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            preview_limit: PREVIEW_LIMIT,
            scope_cleaning_to_schema: true,
        }
    }
}

impl WorkbenchConfig {
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    pub fn with_scope_cleaning_to_schema(mut self, scoped: bool) -> Self {
        self.scope_cleaning_to_schema = scoped;
        self
    }
}

/// Holds the current dataset, its schema and the last cleaning result.
///
/// Records are never modified. Cleaning produces a retained view that
/// search, statistics and snapshots read from until the next load.
pub struct Workbench {
    config: WorkbenchConfig,
    parser: Parser,
    data: RecordSet,
    schema: Schema,
    source: Option<SourceMetadata>,
    cleaning: Option<CleaningResult>,
    listeners: Vec<Arc<dyn SchemaListener>>,
}

impl Workbench {
    /// Create an empty workbench with default configuration.
    pub fn new() -> Self {
        Self::with_config(WorkbenchConfig::default())
    }

    /// Create an empty workbench with custom configuration.
    pub fn with_config(config: WorkbenchConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self {
            config,
            parser,
            data: RecordSet::from_rows(Vec::new(), Vec::<Vec<Vec<Option<String>>>>::new()),
            schema: Schema::default(),
            source: None,
            cleaning: None,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    /// Replace the dataset with parsed text and infer a fresh schema.
    pub fn load_str(&mut self, text: &str) -> Result<&Schema> {
        let data = self.parser.parse_str(text)?;
        self.replace(data, None)
    }

    /// Replace the dataset with a parsed file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&Schema> {
        let (data, source) = self.parser.parse_file(path)?;
        self.replace(data, Some(source))
    }

    /// Replace the dataset with an already-parsed record set.
    pub fn load_records(&mut self, data: RecordSet) -> Result<&Schema> {
        self.replace(data, None)
    }

    fn replace(&mut self, data: RecordSet, source: Option<SourceMetadata>) -> Result<&Schema> {
        let schema = infer_schema(&data)?;
        info!(
            rows = data.row_count(),
            columns = data.column_count(),
            "dataset loaded"
        );
        self.data = data;
        self.schema = schema;
        self.source = source;
        self.cleaning = None;
        Ok(&self.schema)
    }

    pub fn data(&self) -> &RecordSet {
        &self.data
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    /// The last cleaning result, if one is still current.
    pub fn cleaning(&self) -> Option<&CleaningResult> {
        self.cleaning.as_ref()
    }

    /// Records after the last cleaning pass, or all records.
    pub fn view(&self) -> &[Record] {
        match &self.cleaning {
            Some(result) => &result.retained,
            None => &self.data.records,
        }
    }

    /// Register a listener for schema edits.
    pub fn subscribe(&mut self, listener: impl SchemaListener + 'static) {
        self.listeners.push(Arc::new(listener));
    }

    pub fn rename(&mut self, original_name: &str, display_name: impl Into<String>) -> &[ColumnDescriptor] {
        self.edit(SchemaEdit::Rename {
            original_name: original_name.to_string(),
            display_name: display_name.into(),
        });
        self.schema.columns()
    }

    pub fn hide(&mut self, original_name: &str) -> &[ColumnDescriptor] {
        self.edit(SchemaEdit::Hide {
            original_name: original_name.to_string(),
        });
        self.schema.columns()
    }

    pub fn retype(&mut self, original_name: &str, column_type: ColumnType) -> &[ColumnDescriptor] {
        self.edit(SchemaEdit::Retype {
            original_name: original_name.to_string(),
            column_type,
        });
        self.schema.columns()
    }

    /// Apply a schema edit and notify listeners if it changed anything.
    pub fn edit(&mut self, edit: SchemaEdit) -> Option<SchemaEvent> {
        let event = self.schema.apply(edit)?;
        for listener in &self.listeners {
            listener.on_schema_change(&event, self.schema.columns());
        }
        Some(event)
    }

    /// Run a cleaning pass over the full dataset.
    ///
    /// Always starts from the parsed records, so repeating a pass gives the
    /// same result.
    pub fn clean(&mut self, operations: &OperationSet) -> &CleaningResult {
        let engine = if self.config.scope_cleaning_to_schema {
            CleaningEngine::with_scope(self.schema.field_scope())
        } else {
            CleaningEngine::new()
        };
        let result = engine.clean(&self.data.records, operations);
        info!(
            removed = result.removal_set.len(),
            retained = result.retained.len(),
            "dataset cleaned"
        );
        self.cleaning.insert(result)
    }

    /// Drop the current cleaning result.
    pub fn reset_cleaning(&mut self) {
        self.cleaning = None;
    }

    /// Search the visible columns of the current view.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let filter = SearchFilter::new(query)
            .with_limit(self.config.preview_limit)
            .with_scope(self.schema.field_scope());
        match &self.cleaning {
            Some(result) if result.removal_set.applies_to(&self.data) => {
                filter.apply_excluding(&self.data.records, &result.removal_set)
            }
            Some(result) => filter.apply(&result.retained),
            None => filter.apply(&self.data.records),
        }
    }

    /// Quality statistics of the current view.
    pub fn stats(&self) -> QualityStats {
        compute_stats(self.view(), &self.schema)
    }

    pub fn column_quality(&self) -> Vec<ColumnQuality> {
        column_quality(self.view(), &self.schema)
    }

    /// Freeze the current view for persistence.
    pub fn snapshot(&self) -> Snapshot {
        let snapshot = match &self.cleaning {
            Some(result) => Snapshot::from_cleaning(result, &self.schema),
            None => Snapshot::capture(&self.data.records, &self.schema, &self.stats()),
        };
        match &self.source {
            Some(source) => snapshot.with_file_name(source.file.clone()),
            None => snapshot,
        }
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::transform::OperationId;

    const REFERENCE: &str = "a,b\n1,2\n1,2\n3,\n";

    fn ops(ids: &[&str]) -> OperationSet {
        OperationSet::parse(ids).unwrap()
    }

    #[test]
    fn test_empty_workbench() {
        let bench = Workbench::new();
        assert!(bench.view().is_empty());
        assert!(bench.search("").is_empty());
        assert_eq!(bench.stats().row_count, 0);
        assert_eq!(bench.snapshot().rows.len(), 0);
    }

    #[test]
    fn test_clean_and_search_retained_view() {
        let mut bench = Workbench::new();
        bench.load_str(REFERENCE).unwrap();

        let result = bench.clean(&ops(&["remove-na", "remove-duplicates"]));
        assert_eq!(result.removal_set.positions(), vec![1, 2]);

        assert_eq!(bench.search("").len(), 1);
        assert!(bench.search("3").is_empty());
        assert_eq!(bench.stats().row_count, 1);
    }

    #[test]
    fn test_reload_invalidates_cleaning() {
        let mut bench = Workbench::new();
        bench.load_str(REFERENCE).unwrap();
        bench.clean(&ops(&["remove-duplicates"]));
        assert!(bench.cleaning().is_some());

        bench.load_str("x\n1\n").unwrap();
        assert!(bench.cleaning().is_none());
        assert_eq!(bench.schema().columns()[0].original_name, "x");
        assert_eq!(bench.view().len(), 1);
    }

    #[test]
    fn test_listeners_see_effective_edits_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut bench = Workbench::new();
        bench.load_str(REFERENCE).unwrap();
        bench.subscribe(move |event: &SchemaEvent, _: &[ColumnDescriptor]| {
            sink.lock().unwrap().push(event.revision);
        });

        bench.rename("a", "alpha");
        bench.rename("a", "alpha");
        bench.rename("missing", "x");
        bench.hide("b");
        bench.retype("a", ColumnType::Text);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_hidden_columns_scope_remove_na() {
        let mut bench = Workbench::new();
        bench.load_str(REFERENCE).unwrap();
        bench.hide("b");

        let result = bench.clean(&ops(&["remove-na"]));
        assert!(result.removal_set.is_empty());

        let unscoped = WorkbenchConfig::default().with_scope_cleaning_to_schema(false);
        let mut bench = Workbench::with_config(unscoped);
        bench.load_str(REFERENCE).unwrap();
        bench.hide("b");
        assert_eq!(bench.clean(&ops(&["remove-na"])).removal_set.positions(), vec![2]);
    }

    #[test]
    fn test_search_skips_hidden_columns() {
        let mut bench = Workbench::new();
        bench.load_str("name,secret\nAna,zebra\nBo,lion\n").unwrap();
        assert_eq!(bench.search("zebra").len(), 1);

        bench.hide("secret");
        assert!(bench.search("zebra").is_empty());
        assert_eq!(bench.search("ana").len(), 1);
        assert_eq!(bench.search("").len(), 2);
    }

    #[test]
    fn test_snapshot_after_cleaning() {
        let mut bench = Workbench::new();
        bench.load_str(REFERENCE).unwrap();
        bench.rename("a", "A");
        bench.clean(&ops(&["remove-na", "remove-duplicates", "normalize"]));

        let snapshot = bench.snapshot();
        assert!(snapshot.is_cleaned());
        assert_eq!(snapshot.headers, vec!["A", "b"]);
        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(snapshot.null_values, 1);
        assert_eq!(snapshot.duplicates, 1);
        assert_eq!(
            snapshot.cleaning_methods,
            Some(vec![
                OperationId::RemoveNa,
                OperationId::RemoveDuplicates,
                OperationId::Normalize
            ])
        );
    }

    #[test]
    fn test_preview_limit() {
        let text: String = std::iter::once("n".to_string())
            .chain((0..30).map(|i| i.to_string()))
            .collect::<Vec<_>>()
            .join("\n");
        let mut bench = Workbench::with_config(WorkbenchConfig::default().with_preview_limit(10));
        bench.load_str(&text).unwrap();

        assert_eq!(bench.search("  ").len(), 10);
        assert_eq!(bench.search("1").len(), 12);
    }
}
