//! Process-wide facade.
//!
//! A lazily created [`Dispatcher`] over a [`Registry`] holding the default
//! (`""`, stderr at `INFO`) and `"nop"` loggers. The `log_*!` macros and the free
//! functions below all go through it. Logging functions are `#[track_caller]`, so
//! records name the line that called them (or invoked the macro).

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::context::Selector;
use crate::dispatch::{Arg, Dispatcher};
use crate::level::Level;
use crate::logger::{Logger, LoggerName};
use crate::registry::Registry;

static DISPATCHER: Lazy<Dispatcher> = Lazy::new(|| Dispatcher::new(Arc::new(Registry::new())));

pub fn dispatcher() -> &'static Dispatcher {
    &DISPATCHER
}

pub fn registry() -> &'static Registry {
    DISPATCHER.registry().as_ref()
}

/// Shared handle to the process registry, e.g. for a config watcher.
pub fn shared_registry() -> Arc<Registry> {
    Arc::clone(DISPATCHER.registry())
}

pub fn get_logger(name: &str) -> Option<Arc<dyn Logger>> {
    registry().get(name)
}

pub fn set_logger(name: impl Into<LoggerName>, logger: Arc<dyn Logger>) {
    registry().set(name, logger);
}

#[track_caller]
pub fn debug(msg: &str, fields: &[&dyn fmt::Display]) {
    registry().default_logger().debug(msg, fields);
}

#[track_caller]
pub fn info(msg: &str, fields: &[&dyn fmt::Display]) {
    registry().default_logger().info(msg, fields);
}

#[track_caller]
pub fn error(msg: &str, fields: &[&dyn fmt::Display]) {
    registry().default_logger().error(msg, fields);
}

#[track_caller]
pub fn log(level: Level, msg: &str, fields: &[&dyn fmt::Display]) {
    registry()
        .default_logger()
        .log_at(Location::caller(), level, msg, fields);
}

#[track_caller]
pub fn print(args: &[Arg<'_>]) {
    DISPATCHER.print(args);
}

#[track_caller]
pub fn println(args: &[Arg<'_>]) {
    DISPATCHER.println(args);
}

#[track_caller]
pub fn printf(selector: Option<Selector>, message: fmt::Arguments<'_>) {
    DISPATCHER.printf(selector, message);
}

#[track_caller]
pub fn fatal(args: &[Arg<'_>]) -> ! {
    DISPATCHER.fatal(args)
}

#[track_caller]
pub fn fatalf(selector: Option<Selector>, message: fmt::Arguments<'_>) -> ! {
    DISPATCHER.fatalf(selector, message)
}

#[track_caller]
pub fn panic(args: &[Arg<'_>]) -> ! {
    DISPATCHER.panic(args)
}

#[track_caller]
pub fn panicf(selector: Option<Selector>, message: fmt::Arguments<'_>) -> ! {
    DISPATCHER.panicf(selector, message)
}
