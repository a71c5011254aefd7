//! Configuration loading and application.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::{LogConfig, LoggerConfig, LoggerKind, Output};
use crate::config::validation::{level_table, parse_level, validate_config, ValidationError};
use crate::level::{self, Level, LevelNames};
use crate::logger::{LevelLogger, LineWriter, Logger, NopLogger};
use crate::registry::Registry;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("cannot open output {path:?}: {source}")]
    Output { path: PathBuf, source: io::Error },

    #[error("no default logger for {0:?}")]
    UnknownDefault(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<LogConfig, ConfigError> {
    let config: LogConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Register the configured level names and loggers in `registry`.
///
/// Every logger is built before any is registered, so a failing output leaves the
/// registry untouched.
pub fn apply_config(config: &LogConfig, registry: &Registry) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)?;
    let table = level_table(config);

    let mut built = Vec::with_capacity(config.loggers.len());
    for (name, logger) in &config.loggers {
        built.push((name.clone(), build_logger(name, logger, &table)?));
    }

    for (key, name) in &config.level_names {
        if let Ok(raw) = key.trim().parse::<i8>() {
            level::register_level_name(Level::new(raw), name.trim());
        }
    }
    for (name, logger) in built {
        registry.set(name, logger);
    }

    tracing::info!(
        loggers = config.loggers.len(),
        level_names = config.level_names.len(),
        "Configuration applied"
    );
    Ok(())
}

/// Build the logger registered as `name`. `levels` resolves the configured threshold.
pub fn build_logger(
    name: &str,
    config: &LoggerConfig,
    levels: &LevelNames,
) -> Result<Arc<dyn Logger>, ConfigError> {
    if config.kind == LoggerKind::Nop {
        return Ok(Arc::new(NopLogger));
    }

    let threshold = parse_level(levels, &config.level).map_err(|source| {
        ConfigError::Validation(vec![ValidationError::InvalidLevel {
            logger: name.to_string(),
            source,
        }])
    })?;

    let prefix = config.prefix.clone();
    let writer = match config.output() {
        Output::Stderr => LineWriter::new(io::stderr(), prefix, config.flags),
        Output::Stdout => LineWriter::new(io::stdout(), prefix, config.flags),
        Output::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| ConfigError::Output {
                    path: path.clone(),
                    source,
                })?;
            LineWriter::new(file, prefix, config.flags)
        }
    };

    Ok(Arc::new(
        LevelLogger::new(Arc::new(writer)).with_level(threshold),
    ))
}

/// Built-in logger for a well-known key: `""` or `"std"` (stderr at `INFO`), `"nop"`.
pub fn default_logger_for(key: &str) -> Result<Arc<dyn Logger>, ConfigError> {
    match key {
        "" | "std" => Ok(Arc::new(LevelLogger::default())),
        "nop" => Ok(Arc::new(NopLogger)),
        other => Err(ConfigError::UnknownDefault(other.to_string())),
    }
}
