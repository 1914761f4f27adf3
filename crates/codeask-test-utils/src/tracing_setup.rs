//! Tracing bootstrap for tests.
//!
//! The Q&A engine logs its progress markers ("retrieving context",
//! "generating answer") as tracing events. Tests that want those events
//! captured by the test harness call [`init_test_tracing`] first; with
//! `RUST_LOG=debug` the provider and index request internals show up too.

use tracing_subscriber::EnvFilter;

/// Install a subscriber that writes to the test-harness writer, filtered
/// by `RUST_LOG` (default `info`).
///
/// Initialisation happens at most once per process, so every test can
/// call this unconditionally; repeat calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
