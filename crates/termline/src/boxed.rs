//! Bordered boxes for `box` records.

use colored::Color;
use termline_ansi::visible_width;

use crate::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    Solid,
    Double,
    DoubleSingle,
    SingleDouble,
    SingleThick,
    #[default]
    Rounded,
    /// ASCII only, for terminals without unicode
    Classic,
}

struct BorderChars {
    tl: &'static str,
    tr: &'static str,
    bl: &'static str,
    br: &'static str,
    h: &'static str,
    v: &'static str,
}

impl BorderStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "solid" => Some(BorderStyle::Solid),
            "double" => Some(BorderStyle::Double),
            "double-single" | "doublesingle" => Some(BorderStyle::DoubleSingle),
            "single-double" | "singledouble" => Some(BorderStyle::SingleDouble),
            "single-thick" | "singlethick" => Some(BorderStyle::SingleThick),
            "rounded" => Some(BorderStyle::Rounded),
            "classic" | "ascii" => Some(BorderStyle::Classic),
            _ => None,
        }
    }

    fn chars(self) -> BorderChars {
        let (tl, tr, bl, br, h, v) = match self {
            BorderStyle::Solid => ("┌", "┐", "└", "┘", "─", "│"),
            BorderStyle::Double => ("╔", "╗", "╚", "╝", "═", "║"),
            BorderStyle::DoubleSingle => ("╓", "╖", "╙", "╜", "─", "║"),
            BorderStyle::SingleDouble => ("╒", "╕", "╘", "╛", "═", "│"),
            BorderStyle::SingleThick => ("┏", "┓", "┗", "┛", "━", "┃"),
            BorderStyle::Rounded => ("╭", "╮", "╰", "╯", "─", "│"),
            BorderStyle::Classic => ("+", "+", "+", "+", "-", "|"),
        };
        BorderChars {
            tl,
            tr,
            bl,
            br,
            h,
            v,
        }
    }
}

/// Frame options for [`render_box`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxOptions {
    pub title: Option<String>,
    pub border_style: BorderStyle,
    pub border_color: Color,
    /// Inner padding; odd values are rounded up
    pub padding: usize,
    pub margin_left: usize,
    pub margin_top: usize,
    pub margin_bottom: usize,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            title: None,
            border_style: BorderStyle::Rounded,
            border_color: Color::White,
            padding: 2,
            margin_left: 1,
            margin_top: 1,
            margin_bottom: 1,
        }
    }
}

impl BoxOptions {
    /// Apply a record's style spec: comma or space separated border preset
    /// and color names. Unknown words are ignored.
    pub fn with_style_spec(mut self, spec: &str) -> Self {
        for word in spec.split(|c: char| c == ',' || c.is_whitespace()) {
            if word.is_empty() {
                continue;
            }
            if let Some(border) = BorderStyle::from_name(word) {
                self.border_style = border;
            } else if let Some(color) = style::parse_color(word) {
                self.border_color = color;
            }
        }
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Draw `text` inside a frame, vertically centered in its padding.
pub fn render_box(text: &str, opts: &BoxOptions) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let chars = opts.border_style.chars();
    let paint = |s: &str| style::paint(s, opts.border_color);

    let padding = if opts.padding % 2 == 0 {
        opts.padding
    } else {
        opts.padding + 1
    };
    let height = lines.len() + padding;
    let title_width = opts.title.as_deref().map_or(0, visible_width);
    let width = lines
        .iter()
        .map(|line| visible_width(line))
        .max()
        .unwrap_or(0)
        .max(title_width)
        + padding;
    let inner_width = width + padding;
    let left_space = " ".repeat(opts.margin_left);

    let mut out = Vec::with_capacity(height + 4);
    if opts.margin_top > 0 {
        out.push(String::new());
    }

    match &opts.title {
        Some(title) => {
            let left = (width - title_width) / 2;
            let right = width - title_width - left + padding;
            out.push(format!(
                "{}{}{}{}{}{}",
                left_space,
                paint(chars.tl),
                paint(&chars.h.repeat(left)),
                paint(title),
                paint(&chars.h.repeat(right)),
                paint(chars.tr)
            ));
        }
        None => out.push(format!(
            "{}{}{}{}",
            left_space,
            paint(chars.tl),
            paint(&chars.h.repeat(inner_width)),
            paint(chars.tr)
        )),
    }

    let top = (height - lines.len()) / 2;
    for row in 0..height {
        if row < top || row >= top + lines.len() {
            out.push(format!(
                "{}{}{}{}",
                left_space,
                paint(chars.v),
                " ".repeat(inner_width),
                paint(chars.v)
            ));
        } else {
            let line = lines[row - top];
            out.push(format!(
                "{}{}{}{}{}{}",
                left_space,
                paint(chars.v),
                " ".repeat(padding),
                line,
                " ".repeat(width - visible_width(line)),
                paint(chars.v)
            ));
        }
    }

    out.push(format!(
        "{}{}{}{}",
        left_space,
        paint(chars.bl),
        paint(&chars.h.repeat(inner_width)),
        paint(chars.br)
    ));
    if opts.margin_bottom > 0 {
        out.push(String::new());
    }

    out.join("\n")
}
