//! Call-site selectors.
//!
//! # Data Flow
//! ```text
//! ctx!("db", Level::ERROR)
//!     → Hint::from each value (name, level, option, nil)
//!     → folded over Selector::default() ("" / INFO / no fields)
//!     → Selector handed to the dispatch wrappers as their leading argument
//! ```
//!
//! # Design Decisions
//! - Hints are matched by kind, not position; the last name and the last level win
//! - Unsupported hint types are rejected at compile time through `From` conversions;
//!   `Hint::from_value` keeps a runtime check for dynamically typed callers
//! - A selector lives for one call and is never stored

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use crate::level::Level;
use crate::logger::{CallSite, Logger, LoggerName};

/// Mutator applied directly to a selector under construction.
pub type SelectorOption = Arc<dyn Fn(&mut Selector) + Send + Sync>;

/// Target logger, level and extra fields for a single dispatch call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    logger_name: LoggerName,
    level: Level,
    fields: Vec<String>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logger_name(&self) -> &LoggerName {
        &self.logger_name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Fields prepended to every record emitted through this selector.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn set_logger_name(&mut self, name: impl Into<LoggerName>) {
        self.logger_name = name.into();
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn add_field(&mut self, field: impl fmt::Display) {
        self.fields.push(field.to_string());
    }

    /// Fold one hint into the selector.
    pub fn apply(&mut self, hint: Hint) {
        match hint {
            Hint::Name(name) => self.logger_name = name,
            Hint::Level(level) => self.level = level,
            Hint::Option(option) => option(self),
            Hint::Nil => {}
        }
    }

    /// Send a record to `logger` with this selector's fields in front of `values`.
    pub fn log_through(
        &self,
        logger: &dyn Logger,
        site: Option<CallSite>,
        level: Level,
        msg: &str,
        values: &[&dyn fmt::Display],
    ) {
        let emit = |fields: &[&dyn fmt::Display]| match site {
            Some(site) => logger.log_at(site, level, msg, fields),
            None => logger.log(level, msg, fields),
        };
        if self.fields.is_empty() {
            emit(values);
            return;
        }
        let mut all: Vec<&dyn fmt::Display> = Vec::with_capacity(self.fields.len() + values.len());
        all.extend(self.fields.iter().map(|f| f as &dyn fmt::Display));
        all.extend_from_slice(values);
        emit(&all);
    }
}

/// A selector proxies the logger it names in the process-wide registry.
impl Logger for Selector {
    fn log(&self, level: Level, msg: &str, fields: &[&dyn fmt::Display]) {
        let logger = crate::global::registry().resolve(self.logger_name.as_str());
        self.log_through(logger.as_ref(), None, level, msg, fields);
    }

    fn log_at(&self, site: CallSite, level: Level, msg: &str, fields: &[&dyn fmt::Display]) {
        let logger = crate::global::registry().resolve(self.logger_name.as_str());
        self.log_through(logger.as_ref(), Some(site), level, msg, fields);
    }
}

/// One call-site hint.
#[derive(Clone)]
pub enum Hint {
    Name(LoggerName),
    Level(Level),
    Option(SelectorOption),
    Nil,
}

impl Hint {
    /// Classify an arbitrary value by its runtime type.
    ///
    /// Accepts `Hint`, `LoggerName`, `String`, `&'static str`, `Level`, `i8`,
    /// `SelectorOption`, an `Option` of any of these, and `()`. `None` and `()` are nil.
    ///
    /// # Panics
    /// Any other type is a call-site bug and panics with the type's name.
    pub fn from_value<T: Any>(value: T) -> Hint {
        match classify(Box::new(value)) {
            Ok(hint) => hint,
            Err(_) => panic!("ctx does not support hint type: {}", type_name::<T>()),
        }
    }
}

type Unclassified = Box<dyn Any>;

fn classify(value: Unclassified) -> Result<Hint, Unclassified> {
    take::<Hint>(value, |hint: Hint| hint)
        .or_else(|v| take::<LoggerName>(v, Hint::Name))
        .or_else(|v| take::<String>(v, |name: String| Hint::Name(name.into())))
        .or_else(|v| take::<&'static str>(v, |name: &'static str| Hint::Name(name.into())))
        .or_else(|v| take::<Level>(v, Hint::Level))
        .or_else(|v| take::<i8>(v, |raw: i8| Hint::Level(Level::new(raw))))
        .or_else(|v| take::<SelectorOption>(v, Hint::Option))
        .or_else(|v| take::<()>(v, |(): ()| Hint::Nil))
        .or_else(|v| take_optional::<Hint>(v, |hint: Hint| hint))
        .or_else(|v| take_optional::<LoggerName>(v, Hint::Name))
        .or_else(|v| take_optional::<String>(v, |name: String| Hint::Name(name.into())))
        .or_else(|v| take_optional::<&'static str>(v, |name: &'static str| Hint::Name(name.into())))
        .or_else(|v| take_optional::<Level>(v, Hint::Level))
        .or_else(|v| take_optional::<i8>(v, |raw: i8| Hint::Level(Level::new(raw))))
        .or_else(|v| take_optional::<SelectorOption>(v, Hint::Option))
}

fn take<U: Any>(value: Unclassified, to_hint: fn(U) -> Hint) -> Result<Hint, Unclassified> {
    value.downcast::<U>().map(|boxed| to_hint(*boxed))
}

fn take_optional<U: Any>(value: Unclassified, to_hint: fn(U) -> Hint) -> Result<Hint, Unclassified> {
    value
        .downcast::<Option<U>>()
        .map(|boxed| boxed.map_or(Hint::Nil, to_hint))
}

impl fmt::Debug for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Hint::Level(level) => f.debug_tuple("Level").field(level).finish(),
            Hint::Option(_) => f.write_str("Option(..)"),
            Hint::Nil => f.write_str("Nil"),
        }
    }
}

impl From<&str> for Hint {
    fn from(name: &str) -> Self {
        Hint::Name(name.into())
    }
}

impl From<String> for Hint {
    fn from(name: String) -> Self {
        Hint::Name(name.into())
    }
}

impl From<LoggerName> for Hint {
    fn from(name: LoggerName) -> Self {
        Hint::Name(name)
    }
}

impl From<Level> for Hint {
    fn from(level: Level) -> Self {
        Hint::Level(level)
    }
}

impl From<i8> for Hint {
    fn from(raw: i8) -> Self {
        Hint::Level(Level::new(raw))
    }
}

impl From<SelectorOption> for Hint {
    fn from(option: SelectorOption) -> Self {
        Hint::Option(option)
    }
}

impl<T: Into<Hint>> From<Option<T>> for Hint {
    fn from(hint: Option<T>) -> Self {
        hint.map_or(Hint::Nil, Into::into)
    }
}

/// Build a selector from hints. See also the `ctx!` macro.
pub fn ctx<I>(hints: I) -> Selector
where
    I: IntoIterator,
    I::Item: Into<Hint>,
{
    let mut selector = Selector::default();
    for hint in hints {
        selector.apply(hint.into());
    }
    selector
}

/// Option that targets the logger registered as `name`.
pub fn with_logger_name(name: impl Into<LoggerName>) -> SelectorOption {
    let name = name.into();
    Arc::new(move |selector: &mut Selector| selector.logger_name = name.clone())
}

/// Option that sets the severity.
pub fn with_level(level: Level) -> SelectorOption {
    Arc::new(move |selector: &mut Selector| selector.level = level)
}

/// Option that prepends `fields` to every record.
pub fn with_fields<I>(fields: I) -> SelectorOption
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let fields: Vec<String> = fields.into_iter().map(|f| f.to_string()).collect();
    Arc::new(move |selector: &mut Selector| selector.fields.extend(fields.iter().cloned()))
}
