//! Grounding-context rendering.
//!
//! Turns ranked search results into the single context string handed to the
//! model. Each result becomes a fenced block preceded by a file/line-range
//! header; blocks are joined in input order, which carries the relevance
//! ranking from the index.

use crate::index::SearchResult;

/// Render search results into a grounding context.
///
/// Pure function. Callers are responsible for checking emptiness first —
/// an empty result set short-circuits before generation and this is never
/// invoked (see [`crate::qa::QaEngine::ask`]).
///
/// Block shape, per result:
///
/// ```text
/// ---
/// File: <filename> (Lines <start_line> to <end_line>)
/// ```
/// <code>
/// ```
/// ```
pub fn format_context(results: &[SearchResult]) -> String {
    let blocks: Vec<String> = results
        .iter()
        .map(|r| {
            format!(
                "---\nFile: {} (Lines {} to {})\n```\n{}\n```",
                r.filename, r.start_line, r.end_line, r.code
            )
        })
        .collect();
    blocks.join("\n")
}
