//! Print/Fatal/Panic wrappers.
//!
//! # Data Flow
//! ```text
//! print(&[Arg::Ctx(selector), values...])
//!     → split (leading selector consumed only when at least two args)
//!     → Registry::resolve(selector name)   (unknown name → default + diagnostic)
//!     → Selector::log_through(logger, call site, level, msg, fields)
//!     → Terminal action: none | unwind | terminate
//! ```
//!
//! # Design Decisions
//! - Every wrapper funnels into one `dispatch` function; the terminal action is a value
//!   inspected once, after the record is written
//! - Fatal and panic variants always log at `ERROR`
//! - Public entry points are `#[track_caller]`; records are attributed to the caller
//! - Formatted variants receive the selector separately, so it can never be rendered
//!   into the message
//! - Nothing is returned to the caller: failures either degrade (fallback) or leave
//!   the call non-locally (unwind, exit)

use std::fmt::{self, Write as _};
use std::panic::Location;
use std::sync::Arc;

use crate::context::Selector;
use crate::level::Level;
use crate::logger::CallSite;
use crate::registry::Registry;

/// Function called by the fatal family once the record is written.
pub type ExitHook = fn(i32) -> !;

/// Exit status used by the fatal family.
pub const FATAL_EXIT_CODE: i32 = 1;

/// What happens after the record is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Return to the caller.
    None,
    /// Unwind with the rendered message as a `String` payload.
    Unwind,
    /// End the process through the exit hook.
    Terminate,
}

/// One positional argument of the print family.
pub enum Arg<'a> {
    Ctx(Selector),
    Value(&'a dyn fmt::Display),
}

impl<'a> From<Selector> for Arg<'a> {
    fn from(selector: Selector) -> Self {
        Arg::Ctx(selector)
    }
}

impl<'a> From<&'a Selector> for Arg<'a> {
    fn from(selector: &'a Selector) -> Self {
        Arg::Ctx(selector.clone())
    }
}

impl<'a, T: fmt::Display + 'a> From<&'a T> for Arg<'a> {
    fn from(value: &'a T) -> Self {
        Arg::Value(value)
    }
}

/// A selector that was not consumed renders as `logger: <name>: <level>: `.
impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Ctx(selector) => write!(
                f,
                "logger: {}: {}: ",
                selector.logger_name(),
                selector.level()
            ),
            Arg::Value(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Ctx(selector) => f.debug_tuple("Ctx").field(selector).finish(),
            Arg::Value(value) => f.debug_tuple("Value").field(&value.to_string()).finish(),
        }
    }
}

enum Message<'m, 'a> {
    Values(&'m [Arg<'a>]),
    Formatted(fmt::Arguments<'m>),
}

/// Routes print-style calls to loggers of a registry.
pub struct Dispatcher {
    registry: Arc<Registry>,
    exit: ExitHook,
}

impl Dispatcher {
    /// Create a dispatcher whose fatal family calls `std::process::exit`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            exit: std::process::exit,
        }
    }

    /// Replace the function the fatal family ends with.
    pub fn with_exit_hook(mut self, exit: ExitHook) -> Self {
        self.exit = exit;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Log `args`, honouring a leading selector.
    #[track_caller]
    pub fn print(&self, args: &[Arg<'_>]) {
        let (selector, values) = split(args);
        self.dispatch(Location::caller(), selector, Message::Values(values), Terminal::None);
    }

    /// Same as [`Dispatcher::print`].
    #[track_caller]
    pub fn println(&self, args: &[Arg<'_>]) {
        self.print(args);
    }

    /// Log a formatted message.
    #[track_caller]
    pub fn printf(&self, selector: Option<Selector>, message: fmt::Arguments<'_>) {
        self.dispatch(
            Location::caller(),
            selector.unwrap_or_default(),
            Message::Formatted(message),
            Terminal::None,
        );
    }

    /// Log `args` at `ERROR`, then exit the process.
    #[track_caller]
    pub fn fatal(&self, args: &[Arg<'_>]) -> ! {
        let (selector, values) = split(args);
        self.dispatch(Location::caller(), selector, Message::Values(values), Terminal::Terminate);
        unreachable!("exit hook returned")
    }

    /// Same as [`Dispatcher::fatal`].
    #[track_caller]
    pub fn fatalln(&self, args: &[Arg<'_>]) -> ! {
        self.fatal(args)
    }

    /// Log a formatted message at `ERROR`, then exit the process.
    #[track_caller]
    pub fn fatalf(&self, selector: Option<Selector>, message: fmt::Arguments<'_>) -> ! {
        self.dispatch(
            Location::caller(),
            selector.unwrap_or_default(),
            Message::Formatted(message),
            Terminal::Terminate,
        );
        unreachable!("exit hook returned")
    }

    /// Log `args` at `ERROR`, then unwind with the rendered values as payload.
    #[track_caller]
    pub fn panic(&self, args: &[Arg<'_>]) -> ! {
        let (selector, values) = split(args);
        self.dispatch(Location::caller(), selector, Message::Values(values), Terminal::Unwind);
        unreachable!("unwind returned")
    }

    /// Same as [`Dispatcher::panic`].
    #[track_caller]
    pub fn panicln(&self, args: &[Arg<'_>]) -> ! {
        self.panic(args)
    }

    /// Log a formatted message at `ERROR`, then unwind with it as payload.
    #[track_caller]
    pub fn panicf(&self, selector: Option<Selector>, message: fmt::Arguments<'_>) -> ! {
        self.dispatch(
            Location::caller(),
            selector.unwrap_or_default(),
            Message::Formatted(message),
            Terminal::Unwind,
        );
        unreachable!("unwind returned")
    }

    fn dispatch(
        &self,
        site: CallSite,
        mut selector: Selector,
        message: Message<'_, '_>,
        terminal: Terminal,
    ) {
        if terminal != Terminal::None {
            selector.set_level(Level::ERROR);
        }
        let logger = self.registry.resolve(selector.logger_name().as_str());

        let rendered = match message {
            Message::Values(values) => {
                let fields: Vec<&dyn fmt::Display> =
                    values.iter().map(|v| v as &dyn fmt::Display).collect();
                selector.log_through(logger.as_ref(), Some(site), selector.level(), "", &fields);
                if terminal == Terminal::Unwind {
                    join(&fields)
                } else {
                    String::new()
                }
            }
            Message::Formatted(args) => {
                let msg = args.to_string();
                selector.log_through(logger.as_ref(), Some(site), selector.level(), &msg, &[]);
                msg
            }
        };

        match terminal {
            Terminal::None => {}
            Terminal::Unwind => std::panic::panic_any(rendered),
            Terminal::Terminate => {
                tracing::debug!(logger = %selector.logger_name(), site = %site, "Fatal record written, exiting");
                (self.exit)(FATAL_EXIT_CODE)
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// A leading selector is only taken when something follows it.
fn split<'s, 'a>(args: &'s [Arg<'a>]) -> (Selector, &'s [Arg<'a>]) {
    match args {
        [Arg::Ctx(selector), rest @ ..] if !rest.is_empty() => (selector.clone(), rest),
        _ => (Selector::default(), args),
    }
}

fn join(values: &[&dyn fmt::Display]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctx;
    use crate::logger::{Flags, LevelLogger, LineWriter, Logger, MemoryBuffer};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[derive(Debug)]
    struct ExitRequested(i32);

    fn exit_by_unwinding(code: i32) -> ! {
        std::panic::panic_any(ExitRequested(code))
    }

    fn capture(level: Level, buf: &MemoryBuffer) -> Arc<dyn Logger> {
        let writer = Arc::new(LineWriter::new(buf.clone(), "", Flags::none()));
        Arc::new(LevelLogger::new(writer).with_level(level))
    }

    fn setup() -> (Dispatcher, MemoryBuffer) {
        let buf = MemoryBuffer::new();
        let registry = Arc::new(Registry::with_default(capture(Level::INFO, &buf)));
        registry.set("debug", capture(Level::DEBUG, &buf));
        let dispatcher = Dispatcher::new(registry).with_exit_hook(exit_by_unwinding);
        (dispatcher, buf)
    }

    #[test]
    fn test_print_without_selector_uses_default_info() {
        let (dispatcher, buf) = setup();
        dispatcher.println(&[Arg::from(&1), Arg::from(&2), Arg::from(&3)]);
        assert_eq!(buf.lines(), vec!["level: info, 1 2 3"]);
    }

    #[test]
    fn test_print_routes_by_selector() {
        let (dispatcher, buf) = setup();
        let cases: Vec<(Selector, &str)> = vec![
            (ctx!("nop"), ""),
            (ctx!("", Level::ERROR), "level: error, 1 2 3\n"),
            (ctx!(Level::DEBUG), ""),
            (ctx!("debug", Level::DEBUG), "level: debug, 1 2 3\n"),
        ];
        for (i, (selector, expected)) in cases.into_iter().enumerate() {
            dispatcher.println(&[Arg::from(selector), Arg::from(&1), Arg::from(&2), Arg::from(&3)]);
            assert_eq!(buf.contents(), expected, "case {}", i);
            buf.clear();
        }
    }

    #[test]
    fn test_lone_selector_is_rendered_not_consumed() {
        let (dispatcher, buf) = setup();
        dispatcher.print(&[Arg::from(ctx!("debug", Level::DEBUG))]);
        assert_eq!(buf.lines(), vec!["level: info, logger: debug: debug: "]);

        buf.clear();
        dispatcher.print(&[]);
        assert_eq!(buf.lines(), vec!["level: info, "]);
    }

    #[test]
    fn test_unknown_logger_falls_back_with_diagnostic() {
        let (dispatcher, buf) = setup();
        dispatcher.print(&[Arg::from(ctx!("missing")), Arg::from(&"a")]);
        assert_eq!(
            buf.lines(),
            vec!["level: error, msg: logger missing not found, ", "level: info, a"]
        );
    }

    #[test]
    fn test_printf_never_renders_selector() {
        let (dispatcher, buf) = setup();
        let selector = ctx!("debug", Level::DEBUG);
        dispatcher.printf(Some(selector), format_args!("{}: {}", 404, "not found"));
        let out = buf.contents();
        assert_eq!(out, "level: debug, msg: 404: not found, \n");
        assert!(!out.contains("logger:"));
    }

    #[test]
    fn test_printf_default_selector() {
        let (dispatcher, buf) = setup();
        dispatcher.printf(None, format_args!("x={}", 1));
        dispatcher.printf(Some(ctx!(Level::DEBUG)), format_args!("hidden"));
        assert_eq!(buf.lines(), vec!["level: info, msg: x=1, "]);
    }

    #[test]
    fn test_selector_fields_are_prepended() {
        let (dispatcher, buf) = setup();
        let selector = ctx!(crate::context::with_fields(["req=9"]));
        dispatcher.print(&[Arg::from(selector), Arg::from(&"done")]);
        assert_eq!(buf.lines(), vec!["level: info, req=9 done"]);
    }

    #[test]
    fn test_panic_logs_error_then_unwinds_with_payload() {
        let (dispatcher, buf) = setup();
        let result = catch_unwind(AssertUnwindSafe(|| {
            dispatcher.panic(&[Arg::from(ctx!("debug", Level::DEBUG)), Arg::from(&"boom"), Arg::from(&7)])
        }));
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().unwrap(), "boom 7");
        assert_eq!(buf.lines(), vec!["level: error, boom 7"]);
    }

    #[test]
    fn test_panicf_payload_is_formatted_message() {
        let (dispatcher, buf) = setup();
        let result = catch_unwind(AssertUnwindSafe(|| {
            dispatcher.panicf(None, format_args!("bad state {}", 3))
        }));
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().unwrap(), "bad state 3");
        assert_eq!(buf.lines(), vec!["level: error, msg: bad state 3, "]);
    }

    #[test]
    fn test_fatal_logs_error_then_calls_exit_hook() {
        let (dispatcher, buf) = setup();
        let result = catch_unwind(AssertUnwindSafe(|| {
            dispatcher.fatal(&[Arg::from(ctx!(Level::DEBUG)), Arg::from(&"down")])
        }));
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<ExitRequested>().unwrap().0, FATAL_EXIT_CODE);
        assert_eq!(buf.lines(), vec!["level: error, down"]);
    }

    #[test]
    fn test_fatalf_uses_named_logger() {
        let (dispatcher, buf) = setup();
        let result = catch_unwind(AssertUnwindSafe(|| {
            dispatcher.fatalf(Some(ctx!("nop")), format_args!("quiet"))
        }));
        assert!(result.is_err());
        assert!(buf.contents().is_empty());
    }

    #[test]
    fn test_records_attributed_to_wrapper_caller() {
        let buf = MemoryBuffer::new();
        let flags = Flags {
            short_file: true,
            ..Flags::none()
        };
        let writer = Arc::new(LineWriter::new(buf.clone(), "", flags));
        let registry = Arc::new(Registry::with_default(Arc::new(LevelLogger::new(writer))));
        let dispatcher = Dispatcher::new(registry);

        dispatcher.println(&[Arg::from(&"a")]);
        let first = line!() - 1;
        dispatcher.printf(None, format_args!("b"));
        let second = line!() - 1;
        assert_eq!(
            buf.lines(),
            vec![
                format!("mod.rs:{}: level: info, a", first),
                format!("mod.rs:{}: level: info, msg: b, ", second),
            ]
        );
    }

    #[test]
    fn test_arg_display() {
        let selector = ctx!("db", Level::ERROR);
        assert_eq!(Arg::from(&selector).to_string(), "logger: db: error: ");
        assert_eq!(Arg::from(&"x").to_string(), "x");
    }
}
