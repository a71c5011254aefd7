//! Discard-all logger.

use std::fmt;

use crate::level::Level;
use crate::logger::Logger;

/// Drops every record. Registered as `"nop"` in each registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn log(&self, _level: Level, _msg: &str, _fields: &[&dyn fmt::Display]) {}
}
