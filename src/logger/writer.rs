//! Line-oriented output sink.
//!
//! # Responsibilities
//! - Prepend the optional prefix and timestamp header to each record
//! - Guarantee one record per line, terminated by `\n`
//! - Serialize concurrent writers so lines never interleave
//!
//! # Line Layout
//! ```text
//! <prefix><date> <time>[.micros] [file:line: ]<msg>\n      (default)
//! <date> <time>[.micros] [file:line: ]<prefix><msg>\n      (msg_prefix)
//! ```

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::logger::CallSite;

/// Header flags for a [`LineWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Flags {
    /// Local date, e.g. `2009/01/23`.
    pub date: bool,
    /// Local time, e.g. `01:23:23`.
    pub time: bool,
    /// Microsecond resolution, e.g. `01:23:23.123123`. Implies `time`.
    pub microseconds: bool,
    /// Use UTC instead of the local time zone.
    pub utc: bool,
    /// Full source path and line of the call site, e.g. `src/db/pool.rs:23`.
    pub long_file: bool,
    /// Final path element and line of the call site, e.g. `pool.rs:23`. Overrides `long_file`.
    pub short_file: bool,
    /// Move the prefix from the start of the line to just before the message.
    pub msg_prefix: bool,
}

impl Flags {
    /// Date and time, the usual header.
    pub const fn standard() -> Self {
        Self {
            date: true,
            time: true,
            microseconds: false,
            utc: false,
            long_file: false,
            short_file: false,
            msg_prefix: false,
        }
    }

    /// No timestamp at all.
    pub const fn none() -> Self {
        Self {
            date: false,
            time: false,
            microseconds: false,
            utc: false,
            long_file: false,
            short_file: false,
            msg_prefix: false,
        }
    }

    /// The standard header plus the short call site.
    pub const fn standard_with_file() -> Self {
        let mut flags = Self::standard();
        flags.short_file = true;
        flags
    }

    fn has_timestamp(&self) -> bool {
        self.date || self.time || self.microseconds
    }

    fn has_call_site(&self) -> bool {
        self.short_file || self.long_file
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::standard()
    }
}

/// Writes formatted records to a destination stream.
pub struct LineWriter {
    out: Mutex<Box<dyn Write + Send>>,
    prefix: String,
    flags: Flags,
}

impl LineWriter {
    /// Create a writer over `out`.
    pub fn new<W>(out: W, prefix: impl Into<String>, flags: Flags) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            out: Mutex::new(Box::new(out)),
            prefix: prefix.into(),
            flags,
        }
    }

    /// Standard error with date, time and short call site, no prefix.
    pub fn stderr() -> Self {
        Self::new(io::stderr(), "", Flags::standard_with_file())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Render `values` separated by single spaces as one line.
    #[track_caller]
    pub fn print(&self, values: &[&dyn fmt::Display]) -> io::Result<()> {
        let mut msg = String::new();
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                msg.push(' ');
            }
            let _ = write!(msg, "{}", value);
        }
        self.output_at(Some(Location::caller()), &msg)
    }

    /// Render pre-formatted arguments as one line.
    #[track_caller]
    pub fn print_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.output_at(Some(Location::caller()), &args.to_string())
    }

    /// Write `msg` with the header, attributed to the caller.
    #[track_caller]
    pub fn output(&self, msg: &str) -> io::Result<()> {
        self.output_at(Some(Location::caller()), msg)
    }

    /// Write `msg` with the header. A trailing newline is added when missing.
    ///
    /// An unknown `site` renders as `???:0` when a file flag is set.
    pub fn output_at(&self, site: Option<CallSite>, msg: &str) -> io::Result<()> {
        let mut line = String::with_capacity(self.prefix.len() + msg.len() + 32);
        if !self.flags.msg_prefix {
            line.push_str(&self.prefix);
        }
        if self.flags.has_timestamp() {
            if self.flags.utc {
                write_timestamp(&mut line, Utc::now(), self.flags);
            } else {
                write_timestamp(&mut line, Local::now(), self.flags);
            }
        }
        if self.flags.has_call_site() {
            write_call_site(&mut line, site, self.flags);
        }
        if self.flags.msg_prefix {
            line.push_str(&self.prefix);
        }
        line.push_str(msg);
        if !msg.ends_with('\n') {
            line.push('\n');
        }

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(line.as_bytes())?;
        out.flush()
    }
}

impl fmt::Debug for LineWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineWriter")
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

fn write_timestamp<Tz>(line: &mut String, now: DateTime<Tz>, flags: Flags)
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if flags.date {
        let _ = write!(line, "{} ", now.format("%Y/%m/%d"));
    }
    if flags.time || flags.microseconds {
        let _ = write!(line, "{}", now.format("%H:%M:%S"));
        if flags.microseconds {
            let _ = write!(line, "{}", now.format("%.6f"));
        }
        line.push(' ');
    }
}

fn write_call_site(line: &mut String, site: Option<CallSite>, flags: Flags) {
    let (file, number) = match site {
        Some(site) => (site.file(), site.line()),
        None => ("???", 0),
    };
    let file = if flags.short_file {
        file.rsplit(['/', '\\']).next().unwrap_or(file)
    } else {
        file
    };
    let _ = write!(line, "{}:{}: ", file, number);
}

/// In-memory destination, shareable between a writer and the code inspecting it.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Written lines without their terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for MemoryBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
