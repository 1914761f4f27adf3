//! Question-answering engine — retrieval, augmentation, generation.
//!
//! [`QaEngine::ask`] runs the whole per-query pipeline and always comes
//! back with a printable string: a grounded answer, the fixed no-snippets
//! message, or a human-readable error. Per-query failures never escape as
//! errors; only startup configuration problems are fatal, and those are
//! handled before an engine exists.

use tracing::info;

use crate::context::format_context;
use crate::index::CodeIndex;
use crate::llm::{ChatMessage, ChatProvider, ChatRequest};

/// Fixed system instruction framing the model as a codebase assistant and
/// constraining answers to the supplied snippets.
///
/// The "cannot answer" fallback phrase is a soft instruction — the model is
/// asked to emit it, but nothing enforces the exact wording.
pub const SYSTEM_PROMPT: &str = "You are an expert AI assistant who answers questions about a software codebase. \
     You will be given a user's question and a set of relevant code snippets. \
     Your answer must be based *only* on the provided code snippets. \
     If the answer is not in the provided snippets, say 'I cannot answer this question based on the provided code.' \
     Do not make up information. Be concise and clear.";

/// Returned when the index has nothing relevant; the provider is not called.
pub const NO_SNIPPETS_MESSAGE: &str =
    "I couldn't find any relevant code snippets to answer that question.";

/// Low temperature biases toward deterministic, context-grounded output.
const ANSWER_TEMPERATURE: f32 = 0.1;

/// The question-answering engine.
///
/// Holds the two external capabilities — search and generation — behind
/// trait objects so either can be substituted in tests.
pub struct QaEngine {
    index: Box<dyn CodeIndex>,
    provider: Box<dyn ChatProvider>,
    model: String,
}

impl QaEngine {
    /// Create an engine over the given index and provider.
    pub fn new(
        index: Box<dyn CodeIndex>,
        provider: Box<dyn ChatProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            index,
            provider,
            model: model.into(),
        }
    }

    /// One-time index readiness check, run before the interactive loop.
    pub async fn init(&self) -> Result<(), crate::index::IndexError> {
        self.index.init().await
    }

    /// Answer a natural-language question about the codebase.
    ///
    /// Always returns a printable string; search failures, API failures,
    /// and empty result sets all degrade to descriptive messages.
    pub async fn ask(&self, query: &str) -> String {
        info!(%query, "retrieving context");

        let output = match self.index.search(query).await {
            Ok(output) => output,
            Err(e) => {
                return format!(
                    "Error during search: {e}. Is your database running and indexed?"
                );
            }
        };

        if output.results.is_empty() {
            return NO_SNIPPETS_MESSAGE.to_string();
        }

        let context = format_context(&output.results);
        let user_message =
            format!("Here is the relevant code context:\n{context}\n\nQuestion: {query}");

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_message),
            ],
            temperature: ANSWER_TEMPERATURE,
            ..Default::default()
        };

        info!(snippets = output.results.len(), "generating answer");

        match self.provider.chat(&request).await {
            Ok(response) => response.content,
            Err(e) => format!("Error calling Azure OpenAI: {e}"),
        }
    }
}

// Engine behavior is covered in tests/qa_engine.rs: the in-memory fakes
// live in codeask-test-utils, whose trait impls are for the library build
// of this crate and therefore only unify outside the lib-test target.
