//! Code Index Service — the consumed search capability.
//!
//! The index (embedding generation, chunking, vector search, re-indexing)
//! lives in an external service. This module defines the single capability
//! codeask depends on — `search(query) -> QueryOutput` — plus a thin HTTP
//! adapter for the production backend. Everything behind the [`CodeIndex`]
//! trait is substitutable, so tests run against in-memory fakes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::BoxFuture;

/// One ranked code excerpt returned by the index.
///
/// Results carry no identity beyond their position in [`QueryOutput`];
/// ordering reflects relevance ranking and must be preserved downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Source file path.
    pub filename: String,
    /// First line of the excerpt (1-indexed, inclusive).
    pub start_line: u32,
    /// Last line of the excerpt (1-indexed, inclusive).
    pub end_line: u32,
    /// The excerpt text.
    pub code: String,
}

/// The ordered result set for a single query. Created fresh per query and
/// discarded after formatting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryOutput {
    pub results: Vec<SearchResult>,
}

/// Errors from the Code Index Service.
///
/// Index failures are expected, recoverable-later conditions (backend down,
/// not yet indexed) — callers convert them to user-facing strings rather
/// than propagating.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index backend unavailable: {0}")]
    Unavailable(String),

    #[error("index returned status {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("invalid index response: {0}")]
    InvalidResponse(String),
}

/// The one capability codeask consumes from the indexing component.
///
/// Implementations must be `Send + Sync`; the engine holds a `Box<dyn CodeIndex>`.
pub trait CodeIndex: Send + Sync {
    /// One-time, idempotent readiness check, run once before the loop starts.
    fn init(&self) -> BoxFuture<'_, Result<(), IndexError>>;

    /// Retrieve ranked code excerpts for a natural-language query.
    fn search(&self, query: &str) -> BoxFuture<'_, Result<QueryOutput, IndexError>>;
}

/// HTTP adapter for a Code Index Service exposing a JSON search endpoint.
///
/// POSTs `{"query": "..."}` and expects a [`QueryOutput`] body in return.
pub struct HttpCodeIndex {
    client: reqwest::Client,
    search_url: String,
}

/// Optional override for the search endpoint URL.
pub const ENV_INDEX_URL: &str = "CODEASK_INDEX_URL";

/// Search endpoint used when `CODEASK_INDEX_URL` is not set.
pub const DEFAULT_SEARCH_URL: &str = "http://127.0.0.1:8080/search";

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

impl HttpCodeIndex {
    /// Create an adapter for the given search endpoint.
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            search_url: search_url.into(),
        }
    }

    /// Create an adapter from `CODEASK_INDEX_URL`, falling back to the default.
    pub fn from_env() -> Self {
        let url = std::env::var(ENV_INDEX_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());
        Self::new(url)
    }

    /// The configured search endpoint.
    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

impl CodeIndex for HttpCodeIndex {
    fn init(&self) -> BoxFuture<'_, Result<(), IndexError>> {
        Box::pin(async move {
            // Reachability check only: any HTTP response means the backend
            // is up, even if the endpoint rejects the method.
            self.client
                .get(&self.search_url)
                .send()
                .await
                .map_err(|e| IndexError::Unavailable(e.to_string()))?;
            debug!(url = %self.search_url, "index backend reachable");
            Ok(())
        })
    }

    fn search(&self, query: &str) -> BoxFuture<'_, Result<QueryOutput, IndexError>> {
        let query = query.to_string();
        Box::pin(async move {
            let resp = self
                .client
                .post(&self.search_url)
                .json(&SearchRequest { query: &query })
                .send()
                .await
                .map_err(|e| IndexError::Unavailable(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                let message = resp.text().await.unwrap_or_default();
                return Err(IndexError::Backend {
                    status: status.as_u16(),
                    message,
                });
            }

            let output: QueryOutput = resp
                .json()
                .await
                .map_err(|e| IndexError::InvalidResponse(e.to_string()))?;

            debug!(results = output.results.len(), "index search completed");
            Ok(output)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_output_deserializes() {
        let json = r#"{
            "results": [
                {"filename": "src/lib.rs", "start_line": 1, "end_line": 9, "code": "pub fn a() {}"},
                {"filename": "src/qa.rs", "start_line": 40, "end_line": 61, "code": "pub fn b() {}"}
            ]
        }"#;
        let output: QueryOutput = serde_json::from_str(json).unwrap();
        assert_eq!(output.results.len(), 2);
        assert_eq!(output.results[0].filename, "src/lib.rs");
        assert_eq!(output.results[1].start_line, 40);
    }

    #[test]
    fn test_query_output_empty_results() {
        let output: QueryOutput = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(output.results.is_empty());
    }

    #[test]
    fn test_search_request_shape() {
        let body = serde_json::to_value(SearchRequest { query: "how?" }).unwrap();
        assert_eq!(body, serde_json::json!({"query": "how?"}));
    }

    #[test]
    fn test_configured_url_is_exposed() {
        let index = HttpCodeIndex::new(DEFAULT_SEARCH_URL);
        assert_eq!(index.search_url(), "http://127.0.0.1:8080/search");
    }

    #[tokio::test]
    async fn test_search_against_unreachable_backend_errors() {
        // Port 9 (discard) is never serving HTTP in test environments.
        let index = HttpCodeIndex::new("http://127.0.0.1:9/search");
        let err = index.search("anything").await.unwrap_err();
        assert!(matches!(err, IndexError::Unavailable(_)));
    }
}
