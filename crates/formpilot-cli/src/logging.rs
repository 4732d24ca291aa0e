//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Filter from `RUST_LOG`, falling back to the verbosity's directive
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Install the stderr `fmt` subscriber; a second call is a no-op
pub fn init_tracing(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity == Verbosity::Debug)
        .try_init();
}
