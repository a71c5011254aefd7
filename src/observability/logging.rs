//! Tracing subscriber setup for binaries.
//!
//! # Responsibilities
//! - Install the process tracing subscriber used for the crate's own diagnostics
//! - Honour `RUST_LOG`, falling back to a caller-supplied filter
//!
//! # Design Decisions
//! - Library code only emits `tracing` events; installing a subscriber is left to binaries
//! - Diagnostics go to stderr so they never mix with records written to stdout

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a fmt subscriber. Returns `false` when one was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
