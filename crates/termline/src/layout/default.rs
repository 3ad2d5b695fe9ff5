use crate::assembly::assemble_line;
use crate::config::ReporterOptions;
use crate::format::format_timestamp;
use crate::record::{FormatOptions, LogRecord, LogType};
use crate::style;

use super::{is_box, pad_visible, render_record_box, split_message, style_line, Layout, Profile};

/// Compact layout: `[date] LABEL  message`, never wrapped.
#[derive(Debug, Clone)]
pub struct DefaultLayout {
    options: ReporterOptions,
}

impl DefaultLayout {
    pub fn new(options: ReporterOptions) -> Self {
        Self { options }
    }

    fn type_label(&self, record: &LogRecord, opts: &FormatOptions) -> String {
        if record.kind == LogType::Log {
            return String::new();
        }
        let color = style::type_color(&record.kind);

        let label = if let Some(tag) = &record.tag {
            style::text_style(&tag.to_uppercase(), color)
        } else if style::should_use_badge(&record.kind, record.badge_requested()) {
            style::badge_style(&record.kind.label(), color)
        } else {
            let colon = self.options.add_type_colon
                && !(opts.date && !self.options.date_first_position);
            let text = if colon {
                format!("{}:", record.kind.label())
            } else {
                record.kind.label()
            };
            style::text_style(&text, color)
        };

        pad_visible(&label, self.options.padding())
    }

    fn paint(&self, line: &str, kind: &LogType) -> String {
        if self.options.colorize_message() {
            style::paint(line, style::message_color(kind))
        } else {
            line.to_string()
        }
    }
}

impl Layout for DefaultLayout {
    fn profile(&self) -> Profile {
        Profile::Default
    }

    fn format(&self, record: &LogRecord, opts: &FormatOptions) -> String {
        if is_box(record) {
            return render_record_box(record, opts, &self.options);
        }

        let (message, additional) = split_message(record, opts);
        let message = self.paint(&style_line(&message, &record.kind, &self.options, opts), &record.kind);
        let additional: Vec<String> = additional
            .iter()
            .map(|line| self.paint(&style_line(line, &record.kind, &self.options, opts), &record.kind))
            .collect();

        let label = self.type_label(record, opts);
        let date = if opts.date {
            format_timestamp(&record.date)
        } else {
            String::new()
        };

        let head = if self.options.date_first_position {
            [date.as_str(), label.as_str()]
        } else {
            [label.as_str(), date.as_str()]
        };
        assemble_line(&head, &message, &additional)
    }
}
