//! Inline markup in message text.
//!
//! - `{{text}}` renders `text` in the emphasis style, dropping any styling
//!   inside it.
//! - `[[spec]]` / `[[spec|c]]` renders a horizontal rule. `spec` is a single
//!   character (repeated across the available width), a column count, a
//!   percentage of the available width, or `full`. The fill defaults to `—`.
//!
//! The available width is the terminal width minus [`RULE_MARGIN`].
//! Malformed markup is left as it is.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use termline_ansi::strip_ansi;

use crate::style;

/// Columns kept free when a rule spans the full width.
pub const RULE_MARGIN: usize = 2;

pub const DEFAULT_FILL: char = '—';

lazy_static! {
    static ref EMPHASIS_PATTERN: Regex = Regex::new(r"\{\{([^{}]*?)\}\}").unwrap();
    static ref RULE_PATTERN: Regex = Regex::new(r"\[\[(.*?)(?:\|(.*?))?\]\]").unwrap();
}

/// Expand both kinds of markup for a terminal `columns` wide.
pub fn expand(text: &str, columns: usize) -> String {
    expand_rules(&expand_emphasis(text), columns)
}

/// Expand `{{...}}`, innermost first, until no markup is left.
pub fn expand_emphasis(text: &str) -> String {
    let mut current = text.to_string();
    while EMPHASIS_PATTERN.is_match(&current) {
        current = EMPHASIS_PATTERN
            .replace_all(&current, |caps: &Captures| style::emphasis(&strip_ansi(&caps[1])))
            .into_owned();
    }
    current
}

pub fn expand_rules(text: &str, columns: usize) -> String {
    RULE_PATTERN
        .replace_all(text, |caps: &Captures| {
            let fill = caps.get(2).map(|m| m.as_str());
            horizontal_rule(&caps[1], fill, columns).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Build the rule described by `spec`, or `None` when `spec` is not valid.
pub fn horizontal_rule(spec: &str, fill: Option<&str>, columns: usize) -> Option<String> {
    let available = columns.saturating_sub(RULE_MARGIN);
    let fill_char = fill
        .and_then(|f| f.chars().next())
        .filter(|c| !is_markup_char(*c));

    let mut spec_chars = spec.chars();
    let single = match (spec_chars.next(), spec_chars.next()) {
        (Some(c), None) if !c.is_ascii_digit() => Some(c),
        _ => None,
    };

    if let (Some(c), None) = (single, fill) {
        let c = if is_markup_char(c) { DEFAULT_FILL } else { c };
        return Some(c.to_string().repeat(available.max(1)));
    }

    let length = if single.is_some() || spec == "full" {
        available
    } else if let Some(percent) = spec.strip_suffix('%') {
        leading_number(percent)?.min(100) * available / 100
    } else {
        leading_number(spec)?
    };
    let length = length.clamp(1, available.max(1));

    Some(fill_char.unwrap_or(DEFAULT_FILL).to_string().repeat(length))
}

fn is_markup_char(c: char) -> bool {
    matches!(c, '[' | ']' | '{' | '}')
}

/// The integer at the start of `s`, ignoring anything after it.
fn leading_number(s: &str) -> Option<usize> {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
