//! Configuration schema definitions.
//!
//! This module defines the file format for registering loggers and level names.
//! All types derive Serde traits for deserialization from TOML.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logger::Flags;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Display names keyed by raw level, e.g. `"1" = "warn"`.
    pub level_names: BTreeMap<String, String>,

    /// Loggers keyed by registry name. `""` replaces the default logger.
    pub loggers: BTreeMap<String, LoggerConfig>,
}

/// Which logger implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoggerKind {
    /// Threshold-filtering logger over a line sink.
    #[default]
    Std,
    /// Discards everything.
    Nop,
}

/// One registry entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub kind: LoggerKind,

    /// Minimum level written: a level name or a raw integer.
    pub level: String,

    /// `stderr`, `stdout`, or a file path opened for append.
    pub output: String,

    /// Text placed in front of every line (or message, with `msg_prefix`).
    pub prefix: String,

    pub flags: Flags,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            kind: LoggerKind::Std,
            level: "info".to_string(),
            output: "stderr".to_string(),
            prefix: String::new(),
            flags: Flags::standard(),
        }
    }
}

/// Parsed form of [`LoggerConfig::output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stderr,
    Stdout,
    File(PathBuf),
}

impl LoggerConfig {
    pub fn output(&self) -> Output {
        match self.output.trim() {
            "stderr" => Output::Stderr,
            "stdout" => Output::Stdout,
            path => Output::File(PathBuf::from(path)),
        }
    }
}
