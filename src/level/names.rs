//! Level name table.

use dashmap::DashMap;
use thiserror::Error;

use crate::level::Level;

/// Error returned when text names neither a registered level nor a raw integer level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level: {0:?}")]
pub struct LevelParseError(pub String);

/// Mapping from level to display name.
///
/// Reads take a shared lock on one shard, writes an exclusive one. Nothing is held
/// across calls.
#[derive(Debug)]
pub struct LevelNames {
    names: DashMap<Level, String>,
}

impl LevelNames {
    /// Create a table holding the canonical `debug`, `info` and `error` names.
    pub fn new() -> Self {
        let names = DashMap::new();
        names.insert(Level::DEBUG, "debug".to_string());
        names.insert(Level::INFO, "info".to_string());
        names.insert(Level::ERROR, "error".to_string());
        Self { names }
    }

    /// Registered name of `level`, empty when there is none.
    pub fn get(&self, level: Level) -> String {
        self.names
            .get(&level)
            .map(|name| name.value().clone())
            .unwrap_or_default()
    }

    /// Insert or overwrite. Last write wins.
    pub fn register(&self, level: Level, name: impl Into<String>) {
        self.names.insert(level, name.into());
    }

    /// Reverse lookup by display name. Exact matches win over case-insensitive ones;
    /// among levels sharing a name the lowest wins.
    pub fn lookup(&self, name: &str) -> Option<Level> {
        let mut exact: Option<Level> = None;
        let mut folded: Option<Level> = None;
        for entry in self.names.iter() {
            let level = *entry.key();
            if entry.value() == name {
                exact = Some(exact.map_or(level, |found| found.min(level)));
            } else if entry.value().eq_ignore_ascii_case(name) {
                folded = Some(folded.map_or(level, |found| found.min(level)));
            }
        }
        exact.or(folded)
    }

    /// Parse a registered name or a raw `i8` such as `"1"`.
    pub fn parse(&self, text: &str) -> Result<Level, LevelParseError> {
        let text = text.trim();
        if let Some(level) = self.lookup(text) {
            return Ok(level);
        }
        text.parse::<i8>()
            .map(Level::new)
            .map_err(|_| LevelParseError(text.to_string()))
    }
}

impl Default for LevelNames {
    fn default() -> Self {
        Self::new()
    }
}
