//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check level name keys are raw levels and names are non-empty
//! - Check every logger level resolves, custom names included
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is applied to a registry

use thiserror::Error;

use crate::config::schema::{LogConfig, Output};
use crate::level::{self, Level, LevelNames, LevelParseError};

/// A semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("level name key {key:?} is not an integer in -128..=127")]
    InvalidLevelKey { key: String },

    #[error("level {level} has an empty name")]
    EmptyLevelName { level: i8 },

    #[error("logger {logger:?}: {source}")]
    InvalidLevel {
        logger: String,
        source: LevelParseError,
    },

    #[error("logger {logger:?}: empty output path")]
    EmptyOutput { logger: String },
}

/// Validate `config`, collecting every error.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (key, name) in &config.level_names {
        match key.trim().parse::<i8>() {
            Ok(raw) if name.trim().is_empty() => {
                errors.push(ValidationError::EmptyLevelName { level: raw })
            }
            Ok(_) => {}
            Err(_) => errors.push(ValidationError::InvalidLevelKey { key: key.clone() }),
        }
    }

    let table = level_table(config);
    for (name, logger) in &config.loggers {
        if let Err(source) = parse_level(&table, &logger.level) {
            errors.push(ValidationError::InvalidLevel {
                logger: name.clone(),
                source,
            });
        }
        if matches!(logger.output(), Output::File(ref path) if path.as_os_str().is_empty()) {
            errors.push(ValidationError::EmptyOutput {
                logger: name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Canonical names plus the well-formed names configured in `config`.
pub(crate) fn level_table(config: &LogConfig) -> LevelNames {
    let table = LevelNames::new();
    for (key, name) in &config.level_names {
        if let Ok(raw) = key.trim().parse::<i8>() {
            if !name.trim().is_empty() {
                table.register(Level::new(raw), name.trim());
            }
        }
    }
    table
}

/// Resolve against `table`, then against names registered at runtime.
pub(crate) fn parse_level(table: &LevelNames, text: &str) -> Result<Level, LevelParseError> {
    table.parse(text).or_else(|err| level::level_names().lookup(text.trim()).ok_or(err))
}
