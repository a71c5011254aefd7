//! Logger registry.
//!
//! # Responsibilities
//! - Map logger names to logger instances
//! - Guarantee the default (`""`) and discard (`"nop"`) entries exist from construction
//! - Resolve names for dispatch, falling back to the default logger
//!
//! # Design Decisions
//! - Sharded read/write locking (`DashMap`): shared for lookups, exclusive for inserts
//! - Lookups clone the `Arc` and release the lock before any logging I/O
//! - Last writer wins; entries are never removed
//! - The registry is an ordinary value so tests and embedders can own their own

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::logger::{LevelLogger, Logger, LoggerName, NopLogger};
use crate::observability::metrics;

/// Concurrent name → logger map.
pub struct Registry {
    loggers: DashMap<LoggerName, Arc<dyn Logger>>,
}

impl Registry {
    /// Create a registry whose default logger writes `INFO` and above to stderr.
    pub fn new() -> Self {
        Self::with_default(Arc::new(LevelLogger::default()))
    }

    /// Create a registry around the given default logger.
    pub fn with_default(default: Arc<dyn Logger>) -> Self {
        let loggers: DashMap<LoggerName, Arc<dyn Logger>> = DashMap::new();
        loggers.insert(LoggerName::default(), default);
        loggers.insert(LoggerName::from(LoggerName::NOP), Arc::new(NopLogger));
        Self { loggers }
    }

    /// Look up `name`. `None` means it was never registered.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Logger>> {
        self.loggers.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Insert or replace the logger registered as `name`.
    pub fn set(&self, name: impl Into<LoggerName>, logger: Arc<dyn Logger>) {
        let name = name.into();
        tracing::debug!(logger = %name, "Logger registered");
        self.loggers.insert(name, logger);
    }

    /// The logger registered as `""`.
    pub fn default_logger(&self) -> Arc<dyn Logger> {
        // `""` is inserted at construction and never removed.
        self.get("").unwrap_or_else(|| Arc::new(NopLogger))
    }

    /// Logger for `name`, or the default logger when `name` is unknown.
    ///
    /// The fallback is reported through the default logger at `ERROR`.
    pub fn resolve(&self, name: &str) -> Arc<dyn Logger> {
        if let Some(logger) = self.get(name) {
            return logger;
        }

        metrics::record_fallback();
        tracing::warn!(logger = %name, "Logger not found, using default");
        let default = self.default_logger();
        default.error(&format!("logger {} not found", name), &[]);
        default
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<LoggerName> {
        let mut names: Vec<LoggerName> = self.loggers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    /// Always false: the built-in entries cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}
