//! Property-based tests for the Sieve engine.
//!
//! These tests generate random delimited datasets and verify that parsing,
//! cleaning, search and statistics keep their invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p sieve --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p sieve --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use sieve::search::PREVIEW_LIMIT;
use sieve::{
    CleaningEngine, OperationId, OperationSet, Parser, RecordSet, SearchFilter, compute_stats,
    infer_schema,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Small alphabet so duplicate rows show up often.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[ab1]{1,2}",
        1 => Just(String::new()),
    ]
}

/// Header names plus data rows. The first cell of every row is non-empty so
/// no generated data line is blank.
fn dataset() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    (1usize..5).prop_flat_map(|width| {
        let headers = prop::collection::vec("[a-z]{1,6}", width);
        let row = ("[ab1]{1,2}", prop::collection::vec(cell(), width - 1)).prop_map(
            |(first, rest)| std::iter::once(first).chain(rest).collect::<Vec<_>>(),
        );
        (headers, prop::collection::vec(row, 0..80))
    })
}

fn render(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut text = headers.join(",");
    text.push('\n');
    for row in rows {
        text.push_str(&row.join(","));
        text.push('\n');
    }
    text
}

fn parse(headers: &[String], rows: &[Vec<String>]) -> RecordSet {
    Parser::new()
        .parse_str(&render(headers, rows))
        .expect("generated text has a header")
}

fn operation_set() -> impl Strategy<Value = OperationSet> {
    prop::sample::subsequence(OperationId::ALL.to_vec(), 0..=OperationId::ALL.len())
        .prop_map(OperationSet::from_ids)
}

// =============================================================================
// Parser Properties
// =============================================================================

proptest! {
    /// One record per non-empty line after the header.
    #[test]
    fn prop_record_count_matches_lines((headers, rows) in dataset()) {
        let set = parse(&headers, &rows);
        prop_assert_eq!(set.row_count(), rows.len());
        prop_assert_eq!(set.column_count(), headers.len());
    }

    /// Slots are the parsed positions.
    #[test]
    fn prop_slots_are_positions((headers, rows) in dataset()) {
        let set = parse(&headers, &rows);
        for (i, record) in set.records.iter().enumerate() {
            prop_assert_eq!(record.id().slot, i);
            prop_assert_eq!(record.id().batch, set.batch());
        }
    }

    /// Interleaved blank lines never change the parse.
    #[test]
    fn prop_blank_lines_ignored((headers, rows) in dataset()) {
        let plain = parse(&headers, &rows);
        let spaced = render(&headers, &rows).replace('\n', "\n  \n");
        let spaced = Parser::new().parse_str(&spaced).unwrap();

        let keys = |s: &RecordSet| s.records.iter().map(|r| r.canonical_key()).collect::<Vec<_>>();
        prop_assert_eq!(keys(&plain), keys(&spaced));
    }
}

// =============================================================================
// Cleaning Properties
// =============================================================================

proptest! {
    /// remove-na leaves no missing field and partitions the input.
    #[test]
    fn prop_remove_na_partitions((headers, rows) in dataset()) {
        let set = parse(&headers, &rows);
        let ops = OperationSet::from_ids([OperationId::RemoveNa]);
        let result = CleaningEngine::new().clean(&set.records, &ops);

        for record in &result.retained {
            prop_assert!(record.fields().keys().all(|k| !record.is_missing(k)));
        }
        prop_assert_eq!(result.retained.len() + result.removal_set.len(), set.row_count());
    }

    /// remove-duplicates keeps exactly the first occurrence of each key.
    #[test]
    fn prop_remove_duplicates_keeps_first((headers, rows) in dataset()) {
        let set = parse(&headers, &rows);
        let ops = OperationSet::from_ids([OperationId::RemoveDuplicates]);
        let result = CleaningEngine::new().clean(&set.records, &ops);

        let mut seen = HashSet::new();
        let expected: Vec<usize> = set
            .records
            .iter()
            .filter(|r| seen.insert(r.canonical_key()))
            .map(|r| r.id().slot)
            .collect();
        let kept: Vec<usize> = result.retained.iter().map(|r| r.id().slot).collect();
        prop_assert_eq!(kept, expected);
    }

    /// Cleaning an already-cleaned set removes nothing further.
    #[test]
    fn prop_cleaning_is_idempotent((headers, rows) in dataset(), ops in operation_set()) {
        let set = parse(&headers, &rows);
        let engine = CleaningEngine::new();
        let first = engine.clean(&set.records, &ops);
        let second = engine.clean(&first.retained, &ops);

        prop_assert!(second.removal_set.is_empty());
        prop_assert_eq!(second.retained, first.retained);
    }

    /// Operations without an implementation never alter the records.
    #[test]
    fn prop_unimplemented_ops_change_nothing((headers, rows) in dataset(), ops in operation_set()) {
        let set = parse(&headers, &rows);
        let only_unimplemented = OperationSet::from_ids(
            ops.ids()
                .into_iter()
                .filter(|id| !matches!(id, OperationId::RemoveNa | OperationId::RemoveDuplicates)),
        );
        let result = CleaningEngine::new().clean(&set.records, &only_unimplemented);

        prop_assert!(result.removal_set.is_empty());
        prop_assert_eq!(result.retained, set.records);
    }
}

// =============================================================================
// Search and Statistics Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_completeness_in_range((headers, rows) in dataset()) {
        let set = parse(&headers, &rows);
        let schema = infer_schema(&set).unwrap();
        let stats = compute_stats(&set.records, &schema);

        prop_assert!((0.0..=100.0).contains(&stats.completeness_pct));
        prop_assert!((0.0..=100.0).contains(&stats.uniqueness_pct));
    }

    #[test]
    fn prop_blank_query_is_preview((headers, rows) in dataset(), query in "\\s{0,3}") {
        let set = parse(&headers, &rows);
        let hits = SearchFilter::new(&query).apply(&set.records);
        prop_assert_eq!(hits.len(), set.row_count().min(PREVIEW_LIMIT));
    }

    #[test]
    fn prop_absent_substring_matches_nothing((headers, rows) in dataset()) {
        let set = parse(&headers, &rows);
        prop_assert!(SearchFilter::new("nonexistent-substring").apply(&set.records).is_empty());
    }
}
