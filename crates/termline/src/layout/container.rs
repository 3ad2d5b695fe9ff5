use termline_ansi::{visible_width, Wrapper};
use tracing::trace;

use crate::assembly::assemble_line;
use crate::config::ReporterOptions;
use crate::record::{FormatOptions, LogRecord, LogType, SEPARATOR_MARKER};
use crate::style::{self, TEXT_LABELS};

use super::{is_box, pad_visible, render_record_box, split_message, style_line, Layout, Profile};

const LABEL_INDENT: &str = "   ";
const LOG_INDENT: usize = 3;

/// Terminal-width aware layout: labels in a fixed column, message bodies
/// colored by type and wrapped under the label.
#[derive(Debug, Clone)]
pub struct ContainerLayout {
    options: ReporterOptions,
}

impl ContainerLayout {
    pub fn new(options: ReporterOptions) -> Self {
        Self { options }
    }

    fn type_label(&self, record: &LogRecord) -> String {
        if record.kind == LogType::Log {
            return String::new();
        }
        let color = style::type_color(&record.kind);

        if let Some(tag) = &record.tag {
            return format!(
                " {} {}",
                style::emphasis(">"),
                style::badge_style(&tag.to_uppercase(), color)
            );
        }

        let icon = record.kind.icon(self.options.unicode);
        let text = if self.options.icons && !icon.is_empty() {
            icon.to_string()
        } else {
            record.kind.label()
        };
        let styled = if style::should_use_badge(&record.kind, record.badge_requested()) {
            style::badge_style(&text, color)
        } else {
            style::text_style(&text, color)
        };
        format!("{}{}", LABEL_INDENT, pad_visible(&styled, self.options.padding()))
    }

    fn indent_log_line(line: &str) -> String {
        if line.starts_with(SEPARATOR_MARKER) {
            format!(" {}", line)
        } else {
            format!("{}{}", " ".repeat(LOG_INDENT), line)
        }
    }
}

impl Layout for ContainerLayout {
    fn profile(&self) -> Profile {
        Profile::Container
    }

    fn format(&self, record: &LogRecord, opts: &FormatOptions) -> String {
        if is_box(record) {
            return render_record_box(record, opts, &self.options);
        }

        let is_log = record.kind == LogType::Log;
        let (message, additional) = split_message(record, opts);
        let prepare = |line: &str| {
            let line = if is_log {
                Self::indent_log_line(line)
            } else {
                line.to_string()
            };
            style_line(&line, &record.kind, &self.options, opts)
        };

        let label = self.type_label(record);
        let padding = if is_log {
            LOG_INDENT
        } else {
            visible_width(&label) + 1
        };

        let first = assemble_line(&[label.as_str()], &prepare(&message), &[]);
        let lines = std::iter::once(first).chain(additional.iter().map(|line| prepare(line)));

        let columns = opts.effective_columns();
        let wrapper = Wrapper::new(columns).padding(padding).labels(TEXT_LABELS);
        trace!(columns, padding, kind = %record.kind, "laying out container record");

        lines
            .map(|line| {
                let line = if self.options.colorize_message() {
                    style::paint(&line, style::message_color(&record.kind))
                } else {
                    line
                };
                wrapper.wrap(&line).join()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn blank_line_on_finish(&self) -> bool {
        true
    }
}
