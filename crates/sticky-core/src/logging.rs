#![forbid(unsafe_code)]

//! Logging setup helpers.
//!
//! Libraries in this workspace only emit `tracing` events; installing a
//! subscriber is the host's call. These helpers cover the two common cases:
//! tests that want output captured per test, and production hosts that
//! want JSON lines filtered by `RUST_LOG`.

/// Event macros used across the workspace.
#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

/// Install a JSON subscriber honoring `RUST_LOG` (default `info`).
///
/// Returns `false` when a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

/// Install a test-writer subscriber at `debug`; safe to call from every test.
#[cfg(feature = "tracing-json")]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
