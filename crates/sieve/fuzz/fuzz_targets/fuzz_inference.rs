//! Fuzz target for type inference.
//!
//! The date prefilter regex and the numeric literal scanner must not panic
//! on pathological values.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::infer_type;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(value) = std::str::from_utf8(data) {
        let _ = infer_type(Some(value));
        let _ = infer_type(Some(value.trim()));
    }
});
