//! Logger capability and its implementations.
//!
//! # Data Flow
//! ```text
//! Logger::log(level, msg, fields)
//!     → level_logger.rs (drop records below threshold, render record)
//!     → writer.rs (header + line, serialized write)
//!     → destination stream
//! ```
//!
//! # Design Decisions
//! - One threshold-filtering logger parameterized by its sink, no per-destination variants
//! - Implementors must be `Send + Sync` so registry entries can be shared across threads
//! - Convenience methods are defined in terms of `log_at` and report their caller
//!   through `#[track_caller]`

pub mod level_logger;
pub mod nop;
pub mod writer;

use std::borrow::Borrow;
use std::fmt;
use std::panic::Location;

use crate::level::Level;

pub use level_logger::LevelLogger;
pub use nop::NopLogger;
pub use writer::{Flags, LineWriter, MemoryBuffer};

/// Source location a record is attributed to.
pub type CallSite = &'static Location<'static>;

/// Leveled logging surface.
///
/// `fields` are extra values rendered after the message, in order.
pub trait Logger: Send + Sync {
    /// Emit a record at `level` with no known call site.
    fn log(&self, level: Level, msg: &str, fields: &[&dyn fmt::Display]);

    /// Emit a record attributed to `site`. Loggers that do not render call sites
    /// keep the default, which forwards to `log`.
    fn log_at(&self, _site: CallSite, level: Level, msg: &str, fields: &[&dyn fmt::Display]) {
        self.log(level, msg, fields);
    }

    #[track_caller]
    fn debug(&self, msg: &str, fields: &[&dyn fmt::Display]) {
        self.log_at(Location::caller(), Level::DEBUG, msg, fields);
    }

    #[track_caller]
    fn info(&self, msg: &str, fields: &[&dyn fmt::Display]) {
        self.log_at(Location::caller(), Level::INFO, msg, fields);
    }

    #[track_caller]
    fn error(&self, msg: &str, fields: &[&dyn fmt::Display]) {
        self.log_at(Location::caller(), Level::ERROR, msg, fields);
    }
}

/// Name under which a logger is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoggerName(String);

impl LoggerName {
    /// Name of the discard-all logger present in every registry.
    pub const NOP: &'static str = "nop";

    pub fn new(name: impl Into<String>) -> Self {
        LoggerName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The empty name routes to the default logger.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for LoggerName {
    fn from(name: &str) -> Self {
        LoggerName(name.to_string())
    }
}

impl From<String> for LoggerName {
    fn from(name: String) -> Self {
        LoggerName(name)
    }
}

impl Borrow<str> for LoggerName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoggerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
