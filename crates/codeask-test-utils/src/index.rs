//! In-memory [`CodeIndex`] fakes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use codeask_core::index::{CodeIndex, IndexError, QueryOutput, SearchResult};
use codeask_core::BoxFuture;

/// A fake index that returns the same result set for every query and
/// counts how many searches were issued.
pub struct StaticIndex {
    output: QueryOutput,
    searches: Arc<AtomicUsize>,
}

impl StaticIndex {
    /// An index that always returns zero results.
    pub fn empty() -> Self {
        Self::with_results(Vec::new())
    }

    /// An index that always returns the given results, in order.
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            output: QueryOutput { results },
            searches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `search` invocations.
    pub fn search_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.searches)
    }
}

impl CodeIndex for StaticIndex {
    fn init(&self) -> BoxFuture<'_, Result<(), IndexError>> {
        Box::pin(async { Ok(()) })
    }

    fn search(&self, _query: &str) -> BoxFuture<'_, Result<QueryOutput, IndexError>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let output = self.output.clone();
        Box::pin(async move { Ok(output) })
    }
}

/// A fake index whose searches always fail with the given message.
pub struct FailingIndex {
    message: String,
}

impl FailingIndex {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl CodeIndex for FailingIndex {
    fn init(&self) -> BoxFuture<'_, Result<(), IndexError>> {
        let message = self.message.clone();
        Box::pin(async move { Err(IndexError::Unavailable(message)) })
    }

    fn search(&self, _query: &str) -> BoxFuture<'_, Result<QueryOutput, IndexError>> {
        let message = self.message.clone();
        Box::pin(async move { Err(IndexError::Unavailable(message)) })
    }
}

/// Deterministic search results for assertions: `src/module_<i>.rs` with
/// ascending line ranges.
pub fn sample_results(count: usize) -> Vec<SearchResult> {
    (0..count)
        .map(|i| SearchResult {
            filename: format!("src/module_{i}.rs"),
            start_line: (i as u32) * 10 + 1,
            end_line: (i as u32) * 10 + 9,
            code: format!("pub fn module_{i}() {{}}"),
        })
        .collect()
}
