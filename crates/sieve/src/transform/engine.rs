//! Cleaning engine: computes removal marks and the retained view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::input::{FieldScope, Record, RecordId, RecordSet};
use crate::stats::{duplicate_positions, QualityStats};

use super::operations::{CleaningOperation, OperationId, OperationSet, StructuralOp};

/// Records marked for exclusion by one cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalSet {
    batch: Option<u64>,
    ids: BTreeSet<RecordId>,
}

impl RemovalSet {
    fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let ids: BTreeSet<RecordId> = records.into_iter().map(|r| r.id()).collect();
        let batch = ids.iter().next().map(|id| id.batch);
        Self { batch, ids }
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.ids.iter().copied()
    }

    /// Positions of the marked records in their parsed sequence.
    pub fn positions(&self) -> Vec<usize> {
        self.ids.iter().map(|id| id.slot).collect()
    }

    /// Parse event the marks belong to (None when nothing was marked).
    pub fn batch(&self) -> Option<u64> {
        self.batch
    }

    /// Whether these marks still describe `set`.
    pub fn applies_to(&self, set: &RecordSet) -> bool {
        self.batch.is_none_or(|b| b == set.batch())
    }
}

/// Output of one cleaning pass.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    /// Records not marked, in original order.
    pub retained: Vec<Record>,
    /// Union of every rule's marks.
    pub removal_set: RemovalSet,
    /// `null_count` and `duplicate_count` hold the rows each rule removed;
    /// the remaining fields describe `retained`.
    pub stats: QualityStats,
    /// Selected operations that have no effect.
    pub skipped: Vec<OperationId>,
    /// Operations that were selected, in catalog order.
    pub applied: Vec<OperationId>,
}

/// Applies cleaning operations to a record slice.
pub struct CleaningEngine {
    scope: FieldScope,
}

impl CleaningEngine {
    /// Create an engine that checks every field for nulls.
    pub fn new() -> Self {
        Self {
            scope: FieldScope::All,
        }
    }

    /// Restrict `remove-na` to the given fields. Duplicate detection always
    /// compares whole records.
    pub fn with_scope(scope: FieldScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &FieldScope {
        &self.scope
    }

    /// Run one cleaning pass. Never fails; empty input gives an empty result.
    ///
    /// Records must carry distinct ids, as every parsed set does. The
    /// removal set is tagged with the batch of the records it marks, so
    /// records from one parse event are expected.
    pub fn clean(&self, records: &[Record], operations: &OperationSet) -> CleaningResult {
        debug_assert!(
            {
                let mut ids = std::collections::HashSet::with_capacity(records.len());
                records.iter().all(|r| ids.insert(r.id()))
            },
            "cleaning input must have unique record ids"
        );

        let mut marked = BTreeSet::new();
        let mut null_removed = 0;
        let mut duplicate_removed = 0;
        let mut skipped = Vec::new();

        for operation in operations.iter() {
            match operation {
                CleaningOperation::Structural(StructuralOp::RemoveNa) => {
                    let rows = self.null_positions(records);
                    null_removed = rows.len();
                    marked.extend(rows);
                }
                CleaningOperation::Structural(StructuralOp::RemoveDuplicates) => {
                    let rows = duplicate_positions(records);
                    duplicate_removed = rows.len();
                    marked.extend(rows);
                }
                CleaningOperation::Unimplemented(id) => {
                    warn!(operation = %id, "cleaning operation has no implementation; skipped");
                    skipped.push(*id);
                }
            }
        }

        let removal_set = RemovalSet::from_records(marked.iter().map(|&i| &records[i]));
        let retained: Vec<Record> = records
            .iter()
            .enumerate()
            .filter(|(i, _)| !marked.contains(i))
            .map(|(_, r)| r.clone())
            .collect();

        let column_count = match &self.scope {
            FieldScope::All => records.first().map(|r| r.fields().len()).unwrap_or(0),
            FieldScope::Columns(columns) => columns.len(),
        };
        let mut stats = self.residual_stats(&retained, column_count);
        stats.null_count = null_removed;
        stats.duplicate_count = duplicate_removed;

        debug!(
            input = records.len(),
            retained = retained.len(),
            removed = removal_set.len(),
            null_removed,
            duplicate_removed,
            "cleaning pass complete"
        );

        CleaningResult {
            retained,
            removal_set,
            stats,
            skipped,
            applied: operations.ids(),
        }
    }

    fn null_positions(&self, records: &[Record]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.has_missing(&self.scope))
            .map(|(i, _)| i)
            .collect()
    }

    /// Stats of the retained rows themselves, before the removal counts
    /// are written over the null and duplicate fields.
    fn residual_stats(&self, retained: &[Record], column_count: usize) -> QualityStats {
        let nulls = retained
            .iter()
            .map(|r| match &self.scope {
                FieldScope::All => r.fields().keys().filter(|k| r.is_missing(k)).count(),
                FieldScope::Columns(columns) => columns.iter().filter(|c| r.is_missing(c)).count(),
            })
            .sum();
        let duplicates = duplicate_positions(retained).len();
        QualityStats::from_counts(retained.len(), column_count, nulls, duplicates)
    }
}

impl Default for CleaningEngine {
    fn default() -> Self {
        Self::new()
    }
}
