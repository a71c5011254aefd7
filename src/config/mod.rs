//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → loader.rs apply_config (register level names, build loggers)
//!     → Registry::set for every configured name
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads and validates
//!     → apply_config replaces registry entries (last writer wins)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Entries absent from a reloaded file stay registered; the registry never removes

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{apply_config, build_logger, default_logger_for, load_config, parse_config, ConfigError};
pub use schema::{LogConfig, LoggerConfig, LoggerKind, Output};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
