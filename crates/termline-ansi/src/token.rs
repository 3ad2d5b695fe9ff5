use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// The universal SGR reset sequence.
pub const RESET: &str = "\x1b[0m";

lazy_static! {
    static ref SGR_PATTERN: Regex = Regex::new(r"\x1b\[([0-9;]*)m").unwrap();
}

/// Text attributes that accumulate until reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Inverse,
    Hidden,
    Strikethrough,
    /// Any other SGR code we pass through untouched (overline, fonts, ...)
    Other(u16),
}

impl Attribute {
    fn from_code(code: u16) -> Self {
        match code {
            1 => Attribute::Bold,
            2 => Attribute::Dim,
            3 => Attribute::Italic,
            4 => Attribute::Underline,
            5 | 6 => Attribute::Blink,
            7 => Attribute::Inverse,
            8 => Attribute::Hidden,
            9 => Attribute::Strikethrough,
            other => Attribute::Other(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Attribute::Bold => 1,
            Attribute::Dim => 2,
            Attribute::Italic => 3,
            Attribute::Underline => 4,
            Attribute::Blink => 5,
            Attribute::Inverse => 7,
            Attribute::Hidden => 8,
            Attribute::Strikethrough => 9,
            Attribute::Other(code) => code,
        }
    }

    /// Whether the given attribute-reset code switches this attribute off.
    /// Bold and dim share `22`; the others each own one code.
    pub fn is_cleared_by(self, reset: u16) -> bool {
        matches!(
            (self, reset),
            (Attribute::Bold | Attribute::Dim, 22)
                | (Attribute::Italic, 23)
                | (Attribute::Underline, 24)
                | (Attribute::Blink, 25)
                | (Attribute::Inverse, 27)
                | (Attribute::Hidden, 28)
                | (Attribute::Strikethrough, 29)
        )
    }
}

/// A single classified SGR code.
///
/// Combined sequences such as `ESC[1;31m` are split into one token per code,
/// so every token belongs to exactly one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleToken {
    /// Foreground color parameters, e.g. `31`, `91`, `38;5;208` or `39`
    Foreground(String),
    /// Background color parameters, e.g. `41`, `48;2;0;0;0` or `49`
    Background(String),
    Attribute(Attribute),
    /// One of `22..=29`
    AttributeReset(u16),
    Reset,
}

impl StyleToken {
    pub fn escape(&self) -> String {
        match self {
            StyleToken::Foreground(params) | StyleToken::Background(params) => {
                format!("\x1b[{}m", params)
            }
            StyleToken::Attribute(attr) => format!("\x1b[{}m", attr.code()),
            StyleToken::AttributeReset(code) => format!("\x1b[{}m", code),
            StyleToken::Reset => RESET.to_string(),
        }
    }

    pub fn is_reset(&self) -> bool {
        matches!(self, StyleToken::Reset)
    }
}

/// A piece of a styled line: visible text or a style token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Style(StyleToken),
}

/// Split a styled string into text runs and classified style tokens.
///
/// Only SGR sequences (`ESC [ params m`) are recognised; any other escape
/// sequence is treated as visible text.
pub fn tokenize(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in SGR_PATTERN.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            segments.push(Segment::Text(&input[cursor..whole.start()]));
        }
        let params = caps.get(1).map_or("", |m| m.as_str());
        segments.extend(classify(params).into_iter().map(Segment::Style));
        cursor = whole.end();
    }

    if cursor < input.len() {
        segments.push(Segment::Text(&input[cursor..]));
    }
    segments
}

fn classify(params: &str) -> Vec<StyleToken> {
    if params.is_empty() {
        return vec![StyleToken::Reset];
    }

    let codes: Vec<u16> = params
        .split(';')
        .map(|p| p.parse().unwrap_or(0))
        .collect();
    let mut tokens = Vec::with_capacity(codes.len());
    let mut i = 0;

    while i < codes.len() {
        let code = codes[i];
        match code {
            0 => tokens.push(StyleToken::Reset),
            22..=25 | 27..=29 => tokens.push(StyleToken::AttributeReset(code)),
            30..=37 | 39 | 90..=97 => tokens.push(StyleToken::Foreground(code.to_string())),
            40..=47 | 49 | 100..=107 => tokens.push(StyleToken::Background(code.to_string())),
            38 | 48 => {
                let take = match codes.get(i + 1) {
                    Some(5) => 2,
                    Some(2) => 4,
                    _ => 0,
                };
                if take == 0 || i + take >= codes.len() {
                    // Malformed extended color: drop the rest of the sequence.
                    break;
                }
                let joined = codes[i..=i + take]
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(";");
                tokens.push(if code == 38 {
                    StyleToken::Foreground(joined)
                } else {
                    StyleToken::Background(joined)
                });
                i += take;
            }
            other => tokens.push(StyleToken::Attribute(Attribute::from_code(other))),
        }
        i += 1;
    }
    tokens
}

/// Remove every SGR sequence from `text`.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    SGR_PATTERN.replace_all(text, "")
}

/// Terminal columns occupied by `text` once its styles are stripped.
pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(text).as_ref())
}
