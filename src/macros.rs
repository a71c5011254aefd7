//! Call-site macros over the process-wide facade.
//!
//! Macros use `$crate` paths so callers only need `levelog` itself.

/// Build a [`Selector`](crate::context::Selector) from hints in any order.
///
/// ```
/// use levelog::{ctx, Level};
/// let selector = ctx!("db", Level::ERROR);
/// assert_eq!(selector, ctx!(Level::ERROR, "db"));
/// ```
#[macro_export]
macro_rules! ctx {
    () => {
        $crate::context::Selector::default()
    };
    ($($hint:expr),+ $(,)?) => {
        $crate::context::ctx([$($crate::context::Hint::from($hint)),+])
    };
}

/// Log values; a leading `ctx!(..)` picks the logger and level.
#[macro_export]
macro_rules! log_print {
    ($($arg:expr),* $(,)?) => {
        $crate::global::print(&[$($crate::dispatch::Arg::from(&$arg)),*])
    };
}

/// Same as [`log_print!`].
#[macro_export]
macro_rules! log_println {
    ($($arg:expr),* $(,)?) => {
        $crate::global::println(&[$($crate::dispatch::Arg::from(&$arg)),*])
    };
}

/// Log a formatted message, optionally preceded by a selector.
///
/// ```no_run
/// use levelog::{ctx, log_printf, Level};
/// log_printf!("{} items", 3);
/// log_printf!(ctx!("db", Level::ERROR), "query failed: {}", "timeout");
/// ```
#[macro_export]
macro_rules! log_printf {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::printf(None, format_args!($fmt $($arg)*))
    };
    ($selector:expr, $fmt:literal $($arg:tt)*) => {
        $crate::global::printf(Some($selector), format_args!($fmt $($arg)*))
    };
}

/// Log values at `ERROR`, then exit the process.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:expr),* $(,)?) => {
        $crate::global::fatal(&[$($crate::dispatch::Arg::from(&$arg)),*])
    };
}

/// Same as [`log_fatal!`].
#[macro_export]
macro_rules! log_fatalln {
    ($($arg:expr),* $(,)?) => {
        $crate::global::fatal(&[$($crate::dispatch::Arg::from(&$arg)),*])
    };
}

/// Log a formatted message at `ERROR`, then exit the process.
#[macro_export]
macro_rules! log_fatalf {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::fatalf(None, format_args!($fmt $($arg)*))
    };
    ($selector:expr, $fmt:literal $($arg:tt)*) => {
        $crate::global::fatalf(Some($selector), format_args!($fmt $($arg)*))
    };
}

/// Log values at `ERROR`, then panic with them as payload.
#[macro_export]
macro_rules! log_panic {
    ($($arg:expr),* $(,)?) => {
        $crate::global::panic(&[$($crate::dispatch::Arg::from(&$arg)),*])
    };
}

/// Same as [`log_panic!`].
#[macro_export]
macro_rules! log_panicln {
    ($($arg:expr),* $(,)?) => {
        $crate::global::panic(&[$($crate::dispatch::Arg::from(&$arg)),*])
    };
}

/// Log a formatted message at `ERROR`, then panic with it as payload.
#[macro_export]
macro_rules! log_panicf {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::panicf(None, format_args!($fmt $($arg)*))
    };
    ($selector:expr, $fmt:literal $($arg:tt)*) => {
        $crate::global::panicf(Some($selector), format_args!($fmt $($arg)*))
    };
}
