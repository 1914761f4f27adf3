//! Chat-completion integration.
//!
//! The Q&A engine talks to a hosted model through the [`ChatProvider`]
//! trait. The shipped implementation is [`AzureOpenAiProvider`] (Azure
//! OpenAI deployments via the Chat Completions API); tests substitute
//! in-memory fakes behind the same trait.
//!
//! No streaming and no tool use — each query is a single two-message
//! request (system instruction + grounded user message) returning one
//! completion.

pub mod azure;
pub mod provider;
pub mod types;

pub use azure::AzureOpenAiProvider;
pub use provider::{ChatProvider, LlmError};
pub use types::*;
