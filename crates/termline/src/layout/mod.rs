//! Layout profiles.
//!
//! A [`Layout`] turns one record into the text of one log entry (without the
//! blank lines decided by the session policy). The profile is picked once
//! when the reporter is built.

mod container;
mod default;

pub use container::ContainerLayout;
pub use default::DefaultLayout;

use serde::{Deserialize, Serialize};
use termline_ansi::visible_width;

use crate::boxed::{render_box, BorderStyle, BoxOptions};
use crate::config::ReporterOptions;
use crate::format::{character_format, format_args};
use crate::record::{FormatOptions, LogRecord, LogType};
use crate::style;

/// Supported layout profiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Compact: timestamp and padded label, no wrapping
    #[default]
    Default,
    /// Terminal-width aware: wrapped and colored message bodies
    Container,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Default => write!(f, "default"),
            Profile::Container => write!(f, "container"),
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "fancy" => Ok(Profile::Default),
            "container" => Ok(Profile::Container),
            _ => Err(format!("Unknown layout profile: {}", s)),
        }
    }
}

/// Rendering strategy of a profile
pub trait Layout: Send + Sync {
    fn profile(&self) -> Profile;

    /// Render a record, without trailing newline.
    fn format(&self, record: &LogRecord, opts: &FormatOptions) -> String;

    /// Whether one extra newline is written when the reporter finishes.
    fn blank_line_on_finish(&self) -> bool {
        false
    }
}

/// Build the layout for the configured profile.
pub fn for_profile(options: &ReporterOptions) -> Box<dyn Layout> {
    match options.profile {
        Profile::Default => Box::new(DefaultLayout::new(options.clone())),
        Profile::Container => Box::new(ContainerLayout::new(options.clone())),
    }
}

/// Formatted arguments split into the first line and the continuation lines.
pub(crate) fn split_message(record: &LogRecord, opts: &FormatOptions) -> (String, Vec<String>) {
    let text = format_args(&record.args, opts);
    let mut lines = text.split('\n').map(str::to_string);
    let message = lines.next().unwrap_or_default();
    (message, lines.collect())
}

pub(crate) fn is_box(record: &LogRecord) -> bool {
    record.kind == LogType::Box
}

/// Frame a `box` record, bypassing the line assembler.
pub(crate) fn render_record_box(
    record: &LogRecord,
    opts: &FormatOptions,
    options: &ReporterOptions,
) -> String {
    let (message, additional) = split_message(record, opts);
    let columns = opts.effective_columns();
    let content = std::iter::once(message)
        .chain(additional)
        .map(|line| crate::markup::expand(&line, columns))
        .collect::<Vec<_>>()
        .join("\n");

    let mut box_options = BoxOptions::default();
    if !options.unicode {
        box_options.border_style = BorderStyle::Classic;
    }
    if let Some(spec) = &record.style {
        box_options = box_options.with_style_spec(spec);
    }
    if let Some(title) = &record.title {
        box_options = box_options.with_title(character_format(title));
    }

    render_box(&character_format(&content), &box_options)
}

/// Pad `text` with spaces to `width` visible columns.
pub(crate) fn pad_visible(text: &str, width: usize) -> String {
    let visible = visible_width(text);
    if visible >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - visible))
}

/// Expand markup, then apply the dim and message color rules to one line.
pub(crate) fn style_line(
    line: &str,
    kind: &LogType,
    options: &ReporterOptions,
    opts: &FormatOptions,
) -> String {
    let mut line = crate::markup::expand(line, opts.effective_columns());
    if options.is_dimmed(kind) {
        line = style::dim(&line);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use termline_ansi::strip_ansi;

    #[test]
    fn test_profile_from_str() {
        assert_eq!("container".parse::<Profile>().unwrap(), Profile::Container);
        assert_eq!("DEFAULT".parse::<Profile>().unwrap(), Profile::Default);
        assert!("fancy-pants".parse::<Profile>().is_err());
        assert_eq!(Profile::Container.to_string(), "container");
    }

    #[test]
    fn test_for_profile_selects_layout() {
        let layout = for_profile(&ReporterOptions::container());
        assert_eq!(layout.profile(), Profile::Container);
        assert!(layout.blank_line_on_finish());

        let layout = for_profile(&ReporterOptions::default());
        assert_eq!(layout.profile(), Profile::Default);
        assert!(!layout.blank_line_on_finish());
    }

    #[test]
    fn test_split_message() {
        let record = LogRecord::message(LogType::Info, "first\nsecond\nthird");
        let (message, additional) = split_message(&record, &FormatOptions::default());
        assert_eq!(message, "first");
        assert_eq!(additional, vec!["second", "third"]);
    }

    #[test]
    fn test_pad_visible_ignores_escapes() {
        colored::control::set_override(true);
        let padded = pad_visible(&style::text_style("INFO", colored::Color::Blue), 6);
        assert_eq!(strip_ansi(&padded), "INFO  ");
        assert_eq!(pad_visible("TOOLONG", 4), "TOOLONG");
    }

    #[test]
    fn test_box_record_uses_title_and_style() {
        let record = LogRecord::message(LogType::Box, "hello")
            .with_title("Greeting")
            .with_style("classic");
        let out = render_record_box(&record, &FormatOptions::new(80), &ReporterOptions::default());
        let plain = strip_ansi(&out).into_owned();
        assert!(plain.lines().nth(1).unwrap().contains("Greeting"));
        assert!(plain.contains("|  hello"));
    }

    #[test]
    fn test_box_content_expands_markup() {
        let record = LogRecord::message(LogType::Box, "{{big}} news\n[[4|=]]").with_style("classic");
        let out = render_record_box(&record, &FormatOptions::new(80), &ReporterOptions::default());
        let plain = strip_ansi(&out).into_owned();
        assert!(plain.contains("|  big news  |"), "{}", plain);
        assert!(plain.contains("|  ====      |"), "{}", plain);
        assert!(!plain.contains("{{") && !plain.contains("[["));
    }
}
