//! Test infrastructure for the switch shell emulator
//!
//! Provides:
//! - Switch and session fixtures matching a small Brocade lab switch
//! - Scripted scenarios (line in, expected lines out)
//! - Session verification helpers
//! - Test logging setup

pub mod fixtures;
mod verification;

pub use fixtures::*;
pub use verification::*;

/// Install a `tracing` subscriber writing to the test output
///
/// Honours `RUST_LOG`, defaulting to `debug`. Safe to call from every test;
/// only the first call installs anything.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
