//! Vigil Logging
//!
//! One place to install the global `tracing` subscriber so every binary
//! and integration test formats and filters the same way. Filtering
//! follows `RUST_LOG`; without it, `info` and up.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber.
///
/// Safe to call more than once: later calls (a second test in the same
/// process) are no-ops instead of panics.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// Install a subscriber tuned for test output: compact, with targets,
/// honoring `RUST_LOG` the same way as [`init`].
pub fn init_for_tests() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = fmt().compact().with_env_filter(filter).with_test_writer().try_init();
}
