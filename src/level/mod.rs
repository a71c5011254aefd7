//! Severity levels.
//!
//! # Responsibilities
//! - Define the ordered severity type used by every logger
//! - Own the process-wide level name table
//! - Parse levels from configuration and CLI text
//!
//! # Design Decisions
//! - A level is a raw `i8`; ordering is the integer ordering and never changes
//! - Only display names are mutable at runtime
//! - The gap between `INFO` (0) and `ERROR` (2) leaves room for a warn level

pub mod names;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

pub use names::{LevelNames, LevelParseError};

static LEVEL_NAMES: Lazy<LevelNames> = Lazy::new(LevelNames::new);

/// Log severity. Higher values are more severe. Defaults to `INFO`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i8);

impl Level {
    /// Voluminous diagnostics, usually disabled in production.
    pub const DEBUG: Level = Level(-1);
    /// The default priority.
    pub const INFO: Level = Level(0);
    /// High-priority records. A healthy application emits none.
    pub const ERROR: Level = Level(2);

    pub const fn new(raw: i8) -> Self {
        Level(raw)
    }

    pub const fn as_i8(self) -> i8 {
        self.0
    }

    /// Display name from the process-wide table, or an empty string when none is registered.
    pub fn name(self) -> String {
        LEVEL_NAMES.get(self)
    }
}

impl From<i8> for Level {
    fn from(raw: i8) -> Self {
        Level(raw)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LEVEL_NAMES.parse(s)
    }
}

/// Register (or overwrite) the display name of `level` in the process-wide table.
pub fn register_level_name(level: Level, name: impl Into<String>) {
    let name = name.into();
    tracing::debug!(level = level.as_i8(), name = %name, "Level name registered");
    LEVEL_NAMES.register(level, name);
}

/// The process-wide level name table.
pub fn level_names() -> &'static LevelNames {
    &LEVEL_NAMES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering_is_fixed() {
        assert!(Level::DEBUG < Level::INFO);
        assert!(Level::INFO < Level::ERROR);
        assert!(Level::INFO < Level::new(1));
        assert!(Level::new(1) < Level::ERROR);
    }

    #[test]
    fn test_default_level_is_info() {
        assert_eq!(Level::default(), Level::INFO);
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(Level::DEBUG.to_string(), "debug");
        assert_eq!(Level::INFO.to_string(), "info");
        assert_eq!(Level::ERROR.to_string(), "error");
    }

    #[test]
    fn test_unregistered_level_renders_empty() {
        assert_eq!(Level::new(42).name(), "");
    }

    #[test]
    fn test_register_level_name_overwrites() {
        let level = Level::new(7);
        register_level_name(level, "notice");
        assert_eq!(level.name(), "notice");
        register_level_name(level, "audit");
        assert_eq!(level.to_string(), "audit");
    }

    #[test]
    fn test_from_str_uses_global_names() {
        register_level_name(Level::new(9), "critical");
        assert_eq!("critical".parse::<Level>().unwrap(), Level::new(9));
        assert_eq!("error".parse::<Level>().unwrap(), Level::ERROR);
        assert_eq!("-1".parse::<Level>().unwrap(), Level::DEBUG);
        assert!("nonsense".parse::<Level>().is_err());
    }
}
