//! Leveled logging facade.
//!
//! A registry maps logger names to loggers; print-style wrappers pick the logger and
//! level from an optional leading selector built with [`ctx!`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use levelog::{ctx, log_println, Level, LevelLogger, LineWriter};
//!
//! let debug = LevelLogger::new(Arc::new(LineWriter::stderr())).with_level(Level::DEBUG);
//! levelog::set_logger("debug", Arc::new(debug));
//!
//! log_println!(ctx!("debug", Level::DEBUG), "cache", "warm");
//! log_println!("served", 200);
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod context;
pub mod dispatch;
pub mod global;
pub mod level;
pub mod logger;
pub mod observability;
pub mod registry;

pub use context::{ctx, Hint, Selector, SelectorOption};
pub use dispatch::{Arg, Dispatcher, Terminal};
pub use global::{debug, error, get_logger, info, log, set_logger};
pub use level::{register_level_name, Level};
pub use logger::{Flags, LevelLogger, LineWriter, Logger, LoggerName, MemoryBuffer, NopLogger};
pub use registry::Registry;
