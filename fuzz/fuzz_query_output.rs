//! Fuzz target for search-response deserialization.
//!
//! Run with: cargo +nightly fuzz run fuzz_query_output
//!
//! This exercises `QueryOutput` JSON parsing with arbitrary byte sequences
//! to find panics or hangs in the deserialization path.

#![no_main]

use libfuzzer_sys::fuzz_target;

use codeask_core::index::QueryOutput;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // We don't care about the result — just that it doesn't panic
        let _ = serde_json::from_str::<QueryOutput>(s);
    }
});
