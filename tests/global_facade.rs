//! Process-wide facade and call-site macros.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use levelog::{
    ctx, get_logger, global, log_panic, log_panicf, log_print, log_println, log_printf,
    register_level_name, set_logger, Flags, Level, LevelLogger, LineWriter, Logger, MemoryBuffer,
};

mod common;

// Tests replacing the default logger must not overlap.
static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

fn install_default() -> MemoryBuffer {
    let buf = MemoryBuffer::new();
    set_logger("", common::capture_logger(Level::INFO, &buf));
    buf
}

#[test]
fn test_builtin_loggers_present() {
    assert!(get_logger("").is_some());
    assert!(get_logger("nop").is_some());
    assert!(get_logger("never-registered").is_none());
}

#[test]
fn test_direct_calls_use_default_logger() {
    let _guard = GLOBAL_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let buf = install_default();

    levelog::debug("hidden", &[]);
    levelog::info("started", &[&"port", &8080]);
    levelog::error("failed", &[]);
    levelog::log(Level::new(1), "between", &[]);

    let lines = buf.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "level: info, msg: started, port 8080");
    assert_eq!(lines[1], "level: error, msg: failed, ");
    assert!(lines[2].ends_with("msg: between, "));
}

#[test]
fn test_macros_route_through_registry() {
    let _guard = GLOBAL_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let buf = install_default();
    let verbose = MemoryBuffer::new();
    set_logger("macros-verbose", common::capture_logger(Level::DEBUG, &verbose));

    log_println!(ctx!("macros-verbose", Level::DEBUG), "a", "b");
    log_println!(ctx!("", Level::DEBUG), "a", "b");
    log_print!(1, 2, 3);
    log_printf!("{} requests", 12);
    log_printf!(ctx!("macros-verbose", Level::ERROR), "{}: {}", "code", 503);

    assert_eq!(
        verbose.lines(),
        vec!["level: debug, a b", "level: error, msg: code: 503, "]
    );
    assert_eq!(
        buf.lines(),
        vec!["level: info, 1 2 3", "level: info, msg: 12 requests, "]
    );
}

#[test]
fn test_panic_macros_unwind_with_payload() {
    let _guard = GLOBAL_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let buf = install_default();

    let result = catch_unwind(AssertUnwindSafe(|| log_panic!("bad", 1)));
    assert_eq!(result.unwrap_err().downcast_ref::<String>().unwrap(), "bad 1");

    let result = catch_unwind(AssertUnwindSafe(|| log_panicf!(ctx!("nop"), "bad {}", 2)));
    assert_eq!(result.unwrap_err().downcast_ref::<String>().unwrap(), "bad 2");

    assert_eq!(buf.lines(), vec!["level: error, bad 1"]);
}

#[test]
fn test_selector_proxies_named_logger() {
    let buf = MemoryBuffer::new();
    set_logger("proxy-target", common::capture_logger(Level::DEBUG, &buf));

    let selector = ctx!("proxy-target", levelog::context::with_fields(["job=7"]));
    selector.debug("tick", &[]);
    selector.error("", &[&"lost"]);

    assert_eq!(
        buf.lines(),
        vec!["level: debug, msg: tick, job=7", "level: error, job=7 lost"]
    );
}

#[test]
fn test_registered_level_name_appears_in_records() {
    let buf = MemoryBuffer::new();
    set_logger("named-levels", common::capture_logger(Level::DEBUG, &buf));
    register_level_name(Level::new(1), "warn");

    let logger: Arc<dyn Logger> = global::registry().resolve("named-levels");
    logger.log(Level::new(1), "disk", &[&"85%"]);
    assert_eq!(buf.lines(), vec!["level: warn, msg: disk, 85%"]);
}

#[test]
fn test_macro_records_name_invocation_line() {
    let buf = MemoryBuffer::new();
    let flags = Flags {
        short_file: true,
        ..Flags::none()
    };
    let writer = Arc::new(LineWriter::new(buf.clone(), "", flags));
    set_logger("call-sites", Arc::new(LevelLogger::new(writer)));

    log_println!(ctx!("call-sites"), "a", "b");
    let first = line!() - 1;
    log_printf!(ctx!("call-sites"), "{} requests", 3);
    let second = line!() - 1;

    assert_eq!(
        buf.lines(),
        vec![
            format!("global_facade.rs:{}: level: info, a b", first),
            format!("global_facade.rs:{}: level: info, msg: 3 requests, ", second),
        ]
    );
}
