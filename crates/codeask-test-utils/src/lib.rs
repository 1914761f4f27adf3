#![deny(unsafe_code)]

//! Shared test utilities for the codeask workspace.
//!
//! Provides in-memory fakes for the two external capabilities (code index
//! and chat provider) plus tracing helpers, so individual crate tests stay
//! concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! codeask-test-utils = { workspace = true }
//! ```

pub mod index;
pub mod provider;
pub mod tracing_setup;

pub use index::{sample_results, FailingIndex, StaticIndex};
pub use provider::{CannedProvider, FailingProvider};
