//! Threshold-filtering logger over a line sink.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use crate::level::Level;
use crate::logger::{CallSite, LineWriter, Logger};
use crate::observability::metrics;

/// Writes records at or above `level` to a [`LineWriter`].
///
/// Records are rendered as `level: <name>, msg: <msg>, <fields...>`, the `msg` part
/// omitted when the message is empty.
#[derive(Debug, Clone)]
pub struct LevelLogger {
    writer: Arc<LineWriter>,
    level: Level,
}

impl LevelLogger {
    /// Create a logger at `INFO` writing to `writer`.
    pub fn new(writer: Arc<LineWriter>) -> Self {
        Self {
            writer,
            level: Level::INFO,
        }
    }

    /// Set the minimum level that is written.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn writer(&self) -> &Arc<LineWriter> {
        &self.writer
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }
}

impl Default for LevelLogger {
    fn default() -> Self {
        Self::new(Arc::new(LineWriter::stderr()))
    }
}

impl Logger for LevelLogger {
    fn log(&self, level: Level, msg: &str, fields: &[&dyn fmt::Display]) {
        self.write_record(None, level, msg, fields);
    }

    fn log_at(&self, site: CallSite, level: Level, msg: &str, fields: &[&dyn fmt::Display]) {
        self.write_record(Some(site), level, msg, fields);
    }
}

impl LevelLogger {
    fn write_record(
        &self,
        site: Option<CallSite>,
        level: Level,
        msg: &str,
        fields: &[&dyn fmt::Display],
    ) {
        if !self.enabled(level) {
            metrics::record_suppressed(level);
            return;
        }

        let mut record = format!("level: {}, ", level);
        if !msg.is_empty() {
            let _ = write!(record, "msg: {}, ", msg);
        }
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                record.push(' ');
            }
            let _ = write!(record, "{}", field);
        }

        match self.writer.output_at(site, &record) {
            Ok(()) => metrics::record_emitted(level),
            Err(e) => {
                metrics::record_write_error();
                tracing::warn!(error = %e, level = level.as_i8(), "Failed to write log record");
            }
        }
    }
}
