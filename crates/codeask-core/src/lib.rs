#![deny(unsafe_code)]

//! codeask core — the retrieval-orchestration and prompt-assembly layer.
//!
//! A question flows through a strictly sequential pipeline: the Code Index
//! Service returns ranked code excerpts, the context formatter renders them
//! into a grounding context, and the Q&A engine submits that context plus
//! the question to a chat-completion provider. The indexing/search backend
//! itself is an external collaborator consumed through the [`CodeIndex`]
//! trait; nothing here owns persistent state.

use std::future::Future;
use std::pin::Pin;

/// A type-erased, `Send`-safe, boxed future — the standard return type for async
/// trait methods that require dynamic dispatch (`dyn Trait`).
///
/// Native `async fn` in traits produces opaque return types that are **not**
/// object-safe. Traits consumed via `Box<dyn Trait>` must return a concrete
/// `Pin<Box<dyn Future>>` instead. This alias keeps those signatures readable.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Grounding-context rendering from ranked search results.
pub mod context;
/// Code Index Service capability trait and HTTP adapter.
pub mod index;
/// Chat-completion provider trait and the Azure OpenAI implementation.
pub mod llm;
/// The question-answering engine tying retrieval to generation.
pub mod qa;

pub use context::format_context;
pub use index::{CodeIndex, HttpCodeIndex, IndexError, QueryOutput, SearchResult};
pub use llm::{AzureOpenAiProvider, ChatProvider, LlmError};
pub use qa::QaEngine;
