//! In-memory [`ChatProvider`] fakes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use codeask_core::llm::{ChatProvider, ChatRequest, ChatResponse, LlmError, TokenUsage};
use codeask_core::BoxFuture;

/// A fake provider that replies with a fixed answer and records every
/// request it receives.
pub struct CannedProvider {
    reply: String,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl CannedProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared counter of `chat` invocations.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Shared log of received requests.
    pub fn request_log(&self) -> Arc<Mutex<Vec<ChatRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl ChatProvider for CannedProvider {
    fn name(&self) -> &str {
        "Canned"
    }

    fn chat(&self, request: &ChatRequest) -> BoxFuture<'_, Result<ChatResponse, LlmError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());

        let response = ChatResponse {
            content: self.reply.clone(),
            model: request.model.clone(),
            usage: TokenUsage::default(),
        };
        Box::pin(async move { Ok(response) })
    }
}

/// A fake provider whose calls always fail with a network error.
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ChatProvider for FailingProvider {
    fn name(&self) -> &str {
        "Failing"
    }

    fn chat(&self, _request: &ChatRequest) -> BoxFuture<'_, Result<ChatResponse, LlmError>> {
        let message = self.message.clone();
        Box::pin(async move { Err(LlmError::Network(message)) })
    }
}
