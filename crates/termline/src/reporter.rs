//! The reporter: formats a record with the active layout, applies the break
//! policy, and writes the result to one of two sinks.

use std::io::Write;

use chrono::Utc;
use tracing::debug;

use crate::config::ReporterOptions;
use crate::error::ReporterError;
use crate::layout::{self, Layout};
use crate::record::{FormatOptions, LogRecord, StreamType};
use crate::session::{BreakPolicy, SessionState};

/// One rendered log entry and the sink it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub stream: StreamType,
}

/// Renders records for a terminal.
///
/// Not reentrant: the session state is owned by the reporter and updated on
/// every record, so concurrent callers must serialize access.
pub struct Reporter {
    options: ReporterOptions,
    layout: Box<dyn Layout>,
    policy: BreakPolicy,
    session: SessionState,
}

impl Reporter {
    pub fn new(options: ReporterOptions) -> Self {
        Self {
            layout: layout::for_profile(&options),
            policy: options.break_policy(),
            session: SessionState::new(),
            options,
        }
    }

    pub fn options(&self) -> &ReporterOptions {
        &self.options
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Format a record without touching the session state.
    pub fn format(&self, record: &LogRecord, opts: &FormatOptions) -> String {
        self.layout.format(record, opts)
    }

    /// Render a record as if written at `now_ms` (epoch milliseconds).
    pub fn render_at(&mut self, record: &LogRecord, opts: &FormatOptions, now_ms: i64) -> Rendered {
        let stream = record.stream();
        let separator = record.is_separator();
        let (decision, next) = std::mem::take(&mut self.session).advance(
            &self.policy,
            &record.kind,
            separator,
            stream,
            now_ms,
        );
        self.session = next;
        debug!(
            kind = %record.kind,
            reason = ?decision.reason,
            leading_blank = decision.leading_blank,
            "rendering record"
        );

        let mut text = String::new();
        if decision.leading_blank {
            text.push('\n');
        }
        text.push_str(&self.layout.format(record, opts));
        if decision.trailing_blank {
            text.push('\n');
        }
        text.push('\n');

        Rendered { text, stream }
    }

    pub fn render(&mut self, record: &LogRecord, opts: &FormatOptions) -> Rendered {
        self.render_at(record, opts, Utc::now().timestamp_millis())
    }

    /// Render a record and write it to `stdout` or `stderr` by severity.
    pub fn log(
        &mut self,
        record: &LogRecord,
        opts: &FormatOptions,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<(), ReporterError> {
        let rendered = self.render(record, opts);
        match rendered.stream {
            StreamType::Stdout => write_flushed(stdout, rendered.text.as_bytes()),
            StreamType::Stderr => write_flushed(stderr, rendered.text.as_bytes()),
        }
    }

    /// Close the output: layouts that ask for it get one final newline on
    /// the last sink written to.
    pub fn finish(
        &mut self,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<(), ReporterError> {
        if !self.layout.blank_line_on_finish() {
            return Ok(());
        }
        let Some(target) = self.session.target() else {
            return Ok(());
        };
        match target {
            StreamType::Stdout => write_flushed(stdout, b"\n"),
            StreamType::Stderr => write_flushed(stderr, b"\n"),
        }
    }
}

fn write_flushed(sink: &mut dyn Write, bytes: &[u8]) -> Result<(), ReporterError> {
    sink.write_all(bytes)?;
    sink.flush()?;
    Ok(())
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(ReporterOptions::default())
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("profile", &self.layout.profile())
            .field("options", &self.options)
            .field("session", &self.session)
            .finish()
    }
}
