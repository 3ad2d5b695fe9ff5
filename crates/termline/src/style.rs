//! Style registry: maps log types, tags and color names to terminal styles.
//!
//! Lookups never fail; anything unknown resolves to white.

use colored::{Color, Colorize};

use crate::record::LogType;

/// Labels of the text types, as they appear at the start of a rendered line.
/// A line starting with one of these is truncated rather than wrapped.
pub const TEXT_LABELS: &[&str] = &[
    "ERROR", "WARN", "INFO", "SUCCESS", "DEBUG", "TRACE", "START", "LOG", "SILENT", "READY",
    "BOX", "VERBOSE",
];

/// Parse a color name such as `red`, `bright blue` or `gray`.
pub fn parse_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "gray" | "grey" => Some(Color::BrightBlack),
        other => other.parse().ok(),
    }
}

/// Color of the type label.
pub fn type_color(kind: &LogType) -> Color {
    match kind {
        LogType::Error | LogType::Fatal | LogType::Fail => Color::Red,
        LogType::Ready => Color::Green,
        LogType::Warn => Color::Yellow,
        LogType::Info | LogType::Start => Color::Blue,
        LogType::Success => Color::Magenta,
        LogType::Debug => Color::Cyan,
        LogType::Trace => Color::BrightBlack,
        _ => Color::White,
    }
}

/// Color of the message body in layouts that colorize it.
pub fn message_color(kind: &LogType) -> Color {
    match kind {
        LogType::Error | LogType::Fatal | LogType::Fail => Color::Red,
        LogType::Ready | LogType::Success => Color::Green,
        LogType::Warn => Color::Yellow,
        LogType::Info | LogType::Start => Color::Blue,
        LogType::Debug => Color::Cyan,
        LogType::Trace | LogType::Log => Color::BrightBlack,
        _ => Color::White,
    }
}

/// Foreground for a color name, falling back to the color of a log type
/// with that name (white for anything unknown).
pub fn resolve_foreground(name: &str) -> Color {
    parse_color(name).unwrap_or_else(|| type_color(&LogType::from(name)))
}

/// Background paired with [`resolve_foreground`] for badges.
pub fn resolve_background(name: &str) -> Color {
    resolve_foreground(name)
}

/// Bold, colored label.
pub fn text_style(label: &str, color: Color) -> String {
    if label.is_empty() {
        return String::new();
    }
    label.color(color).bold().to_string()
}

/// Bold black label on a colored background, padded by one space each side.
pub fn badge_style(label: &str, color: Color) -> String {
    format!(" {} ", label)
        .black()
        .on_color(color)
        .bold()
        .to_string()
}

/// Badges are forced for `fatal` and `fail`; other non-text types get one
/// only when the caller asked for it.
pub fn should_use_badge(kind: &LogType, requested: bool) -> bool {
    matches!(kind, LogType::Fatal | LogType::Fail) || (!kind.is_text_type() && requested)
}

pub fn paint(text: &str, color: Color) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.color(color).to_string()
}

pub fn dim(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.dimmed().to_string()
}

/// Style of `{{...}}` markup.
pub fn emphasis(text: &str) -> String {
    text.bright_white().to_string()
}

pub fn gray(text: &str) -> String {
    text.bright_black().to_string()
}

pub fn accent(text: &str) -> String {
    text.cyan().to_string()
}
