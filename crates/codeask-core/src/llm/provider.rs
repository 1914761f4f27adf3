//! Chat-completion provider trait — the seam between the Q&A engine and
//! whichever hosted model backs it.

use crate::BoxFuture;

use super::types::{ChatRequest, ChatResponse};

/// Errors from chat-completion calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("authentication failed (check API key): {0}")]
    Auth(String),

    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("provider error: {status} — {message}")]
    ProviderError { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("response parse error: {0}")]
    Parse(String),
}

/// Core trait for chat-completion providers.
///
/// Implementations must be `Send + Sync`. Uses `BoxFuture` for object
/// safety (allows `Box<dyn ChatProvider>`).
pub trait ChatProvider: Send + Sync {
    /// Provider display name (e.g. "Azure OpenAI").
    fn name(&self) -> &str;

    /// Perform a chat completion.
    fn chat(&self, request: &ChatRequest) -> BoxFuture<'_, Result<ChatResponse, LlmError>>;
}
