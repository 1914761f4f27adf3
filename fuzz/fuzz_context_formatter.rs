//! Fuzz target for the grounding-context formatter.
//!
//! Run with: cargo +nightly fuzz run fuzz_context_formatter
//!
//! This exercises `format_context()` with arbitrary filenames and code
//! excerpts to find panics in the rendering pipeline.

#![no_main]

use libfuzzer_sys::fuzz_target;

use codeask_core::index::SearchResult;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (filename, code) = s.split_at_checked(s.len() / 2).unwrap_or((s, ""));
        let results = vec![
            SearchResult {
                filename: filename.to_string(),
                start_line: data.first().copied().unwrap_or(0) as u32,
                end_line: data.last().copied().unwrap_or(0) as u32,
                code: code.to_string(),
            };
            (data.len() % 4) + 1
        ];
        let _ = codeask_core::format_context(&results);
    }
});
