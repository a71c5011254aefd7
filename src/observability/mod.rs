//! Observability for the facade itself.
//!
//! # Data Flow
//! ```text
//! registry / dispatch / config / sinks produce:
//!     → tracing events (operational diagnostics, never records)
//!     → metrics.rs (record, suppression, fallback and write-error counters)
//! ```
//!
//! # Design Decisions
//! - Records routed through loggers are never mirrored into tracing
//! - Counters are cheap and label only by level

pub mod logging;
pub mod metrics;
