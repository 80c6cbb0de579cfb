//! Fuzz target for the delimited-text parser and cleaning pass.
//!
//! Checks that parsing never panics on arbitrary text and that a parsed
//! set always cleans into a partition of its records.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::{CleaningEngine, OperationId, OperationSet, Parser};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let text = String::from_utf8_lossy(data);
    let Ok(set) = Parser::new().parse_str(&text) else {
        return;
    };

    let ops = OperationSet::from_ids(OperationId::ALL);
    let result = CleaningEngine::new().clean(&set.records, &ops);
    assert_eq!(result.retained.len() + result.removal_set.len(), set.row_count());
});
