//! Case-insensitive substring filter.

use crate::input::{FieldScope, Record};
use crate::transform::RemovalSet;

/// Records shown for an empty query.
pub const PREVIEW_LIMIT: usize = 50;

/// A search over record field values.
///
/// A blank query is a preview: the first [`PREVIEW_LIMIT`] records are
/// returned unaltered. The cap is for display only and never feeds
/// statistics or cleaning.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    needle: Option<String>,
    limit: usize,
    scope: FieldScope,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        let needle = if query.trim().is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        Self {
            needle,
            limit: PREVIEW_LIMIT,
            scope: FieldScope::All,
        }
    }

    /// Override the preview window size.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Only match against the given fields.
    pub fn with_scope(mut self, scope: FieldScope) -> Self {
        self.scope = scope;
        self
    }

    /// Whether this filter is a blank-query preview.
    pub fn is_preview(&self) -> bool {
        self.needle.is_none()
    }

    /// Whether a record matches. Null fields never match.
    pub fn matches(&self, record: &Record) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => record
                .values(&self.scope)
                .any(|v| v.to_lowercase().contains(needle.as_str())),
        }
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        self.run(records.iter())
    }

    /// Search the records a cleaning pass retained, without materializing
    /// the retained view.
    pub fn apply_excluding<'a>(
        &self,
        records: &'a [Record],
        removed: &RemovalSet,
    ) -> Vec<&'a Record> {
        self.run(records.iter().filter(|r| !removed.contains(r.id())))
    }

    fn run<'a>(&self, records: impl Iterator<Item = &'a Record>) -> Vec<&'a Record> {
        if self.is_preview() {
            return records.take(self.limit).collect();
        }
        records.filter(|r| self.matches(r)).collect()
    }
}
