use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Message text that marks a record as a visual separator.
pub const SEPARATOR_MARKER: &str = "[[-]]";

/// Columns assumed when the caller does not know the terminal width.
pub const DEFAULT_COLUMNS: usize = 80;

/// Log record type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogType {
    Error,
    Fatal,
    Warn,
    Info,
    Success,
    Debug,
    Trace,
    Fail,
    Start,
    Log,
    Ready,
    Verbose,
    Box,
    /// Any type name the logging facade defines beyond the built-in ones
    Custom(String),
}

impl LogType {
    pub fn as_str(&self) -> &str {
        match self {
            LogType::Error => "error",
            LogType::Fatal => "fatal",
            LogType::Warn => "warn",
            LogType::Info => "info",
            LogType::Success => "success",
            LogType::Debug => "debug",
            LogType::Trace => "trace",
            LogType::Fail => "fail",
            LogType::Start => "start",
            LogType::Log => "log",
            LogType::Ready => "ready",
            LogType::Verbose => "verbose",
            LogType::Box => "box",
            LogType::Custom(name) => name,
        }
    }

    /// Severity used when the facade does not supply one. Lower is more severe.
    pub fn default_level(&self) -> i32 {
        match self {
            LogType::Fatal | LogType::Error => 0,
            LogType::Warn => 1,
            LogType::Log => 2,
            LogType::Debug => 4,
            LogType::Trace => 5,
            LogType::Verbose => 6,
            _ => 3,
        }
    }

    /// Types rendered as plain bold text unless the type itself demands a badge.
    pub fn is_text_type(&self) -> bool {
        !matches!(self, LogType::Fatal | LogType::Fail | LogType::Custom(_))
    }

    /// Types whose transitions force a line break in `auto` mode.
    pub fn is_important(&self) -> bool {
        matches!(
            self,
            LogType::Error | LogType::Fatal | LogType::Warn | LogType::Success | LogType::Info
        )
    }

    /// Word label shown in front of the message. `log` has none.
    pub fn label(&self) -> String {
        match self {
            LogType::Log => String::new(),
            other => other.as_str().to_uppercase(),
        }
    }

    /// Glyph label, with an ASCII fallback for terminals without unicode.
    pub fn icon(&self, unicode: bool) -> &'static str {
        let (glyph, fallback) = match self {
            LogType::Error | LogType::Fatal | LogType::Fail => ("✖", "×"),
            LogType::Ready | LogType::Success => ("✔", "√"),
            LogType::Warn => ("⚠", "‼"),
            LogType::Info => ("ℹ", "i"),
            LogType::Debug => ("⚙", "D"),
            LogType::Trace => ("→", "→"),
            LogType::Start => ("◐", "o"),
            LogType::Verbose => ("⋮", "V"),
            LogType::Log | LogType::Box | LogType::Custom(_) => ("", ""),
        };
        if unicode {
            glyph
        } else {
            fallback
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LogType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => LogType::Error,
            "fatal" => LogType::Fatal,
            "warn" => LogType::Warn,
            "info" => LogType::Info,
            "success" => LogType::Success,
            "debug" => LogType::Debug,
            "trace" => LogType::Trace,
            "fail" => LogType::Fail,
            "start" => LogType::Start,
            "log" => LogType::Log,
            "ready" => LogType::Ready,
            "verbose" => LogType::Verbose,
            "box" => LogType::Box,
            other => LogType::Custom(other.to_string()),
        }
    }
}

impl From<String> for LogType {
    fn from(s: String) -> Self {
        LogType::from(s.as_str())
    }
}

impl From<LogType> for String {
    fn from(kind: LogType) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for LogType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogType::from(s))
    }
}

/// Which of the two sinks a record is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamType {
    Stdout,
    Stderr,
}

/// An error passed as a log argument, with its chain of causes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorValue {
    pub message: String,
    /// Stack trace text; the first line is the error header and is skipped.
    pub stack: Option<String>,
    pub cause: Option<Box<ErrorValue>>,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_cause(mut self, cause: ErrorValue) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Convert a Rust error, following `source()` for at most `max_depth` levels.
    pub fn from_error(err: &(dyn std::error::Error + 'static), max_depth: usize) -> Self {
        let mut chain = vec![ErrorValue::new(err.to_string())];
        let mut source = err.source();
        while let Some(next) = source {
            if chain.len() >= max_depth.max(1) {
                break;
            }
            chain.push(ErrorValue::new(next.to_string()));
            source = next.source();
        }

        let mut value = chain.pop().unwrap_or_default();
        while let Some(parent) = chain.pop() {
            value = parent.with_cause(value);
        }
        value
    }
}

/// One argument of a log call
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    Text(String),
    Value(serde_json::Value),
    Error(ErrorValue),
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        LogArg::Text(s.to_string())
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        LogArg::Text(s)
    }
}

impl From<serde_json::Value> for LogArg {
    fn from(value: serde_json::Value) -> Self {
        LogArg::Value(value)
    }
}

impl From<ErrorValue> for LogArg {
    fn from(error: ErrorValue) -> Self {
        LogArg::Error(error)
    }
}

/// A single event handed over by the logging facade. Read-only to reporters.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub args: Vec<LogArg>,
    pub kind: LogType,
    pub tag: Option<String>,
    pub level: i32,
    pub date: DateTime<Local>,
    /// Explicit badge request; `None` means "badge when level < 2"
    pub badge: Option<bool>,
    /// Box title, for `box` records
    pub title: Option<String>,
    /// Box style spec, for `box` records
    pub style: Option<String>,
}

impl LogRecord {
    pub fn new(kind: impl Into<LogType>, args: Vec<LogArg>) -> Self {
        let kind = kind.into();
        Self {
            args,
            level: kind.default_level(),
            kind,
            tag: None,
            date: Local::now(),
            badge: None,
            title: None,
            style: None,
        }
    }

    /// A record with a single text argument.
    pub fn message(kind: impl Into<LogType>, text: impl Into<String>) -> Self {
        Self::new(kind, vec![LogArg::Text(text.into())])
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_date(mut self, date: DateTime<Local>) -> Self {
        self.date = date;
        self
    }

    pub fn with_badge(mut self, badge: bool) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Whether the caller asked for badge styling, explicitly or by severity.
    pub fn badge_requested(&self) -> bool {
        self.badge.unwrap_or(self.level < 2)
    }

    /// A record whose sole argument is text starting with [`SEPARATOR_MARKER`].
    pub fn is_separator(&self) -> bool {
        matches!(self.args.as_slice(), [LogArg::Text(text)] if text.starts_with(SEPARATOR_MARKER))
    }

    /// Severe records (`level < 2`) go to stderr, everything else to stdout.
    pub fn stream(&self) -> StreamType {
        if self.level < 2 {
            StreamType::Stderr
        } else {
            StreamType::Stdout
        }
    }
}

/// Per-call rendering options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Terminal width; `0` means unknown
    pub columns: usize,
    /// Render a timestamp in front of the record
    pub date: bool,
    /// Nesting depth while formatting error causes
    pub error_level: usize,
}

impl FormatOptions {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    pub fn with_date(mut self, date: bool) -> Self {
        self.date = date;
        self
    }

    /// Width to lay out for, falling back to [`DEFAULT_COLUMNS`].
    pub fn effective_columns(&self) -> usize {
        if self.columns == 0 {
            DEFAULT_COLUMNS
        } else {
            self.columns
        }
    }

    /// Options for formatting the cause one level deeper.
    pub fn nested(&self) -> Self {
        Self {
            error_level: self.error_level + 1,
            ..*self
        }
    }
}
