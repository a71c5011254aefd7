//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use levelog::{Dispatcher, Flags, Level, LevelLogger, LineWriter, Logger, MemoryBuffer, Registry};

/// Function used in place of `std::process::exit` by the fatal family.
#[derive(Debug)]
pub struct ExitRequested(pub i32);

pub fn exit_by_unwinding(code: i32) -> ! {
    std::panic::panic_any(ExitRequested(code))
}

/// Threshold logger writing header-less lines into `buf`.
pub fn capture_logger(level: Level, buf: &MemoryBuffer) -> Arc<dyn Logger> {
    let writer = Arc::new(LineWriter::new(buf.clone(), "", Flags::none()));
    Arc::new(LevelLogger::new(writer).with_level(level))
}

/// Registry with `""` at `INFO` and `"debug"` at `DEBUG`, both writing to one buffer.
pub fn shared_sink_dispatcher() -> (Dispatcher, MemoryBuffer) {
    let buf = MemoryBuffer::new();
    let registry = Arc::new(Registry::with_default(capture_logger(Level::INFO, &buf)));
    registry.set("debug", capture_logger(Level::DEBUG, &buf));
    let dispatcher = Dispatcher::new(registry).with_exit_hook(exit_by_unwinding);
    (dispatcher, buf)
}
