use lazy_static::lazy_static;
use regex::Regex;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};
use tracing::trace;

use crate::state::StyleState;
use crate::token::{strip_ansi, tokenize, visible_width, Segment, StyleToken, RESET};
use crate::truncate::truncate_with_ellipsis;

lazy_static! {
    /// Up to three spaces, then an uppercase word followed by whitespace.
    static ref LABEL_PATTERN: Regex = Regex::new(r"^\s{0,3}([A-Z]+)\s").unwrap();
}

/// Columns kept free at the right edge when truncating a labeled line.
const TRUNCATE_MARGIN: usize = 2;

/// Output of [`Wrapper::wrap`]: one string per terminal row.
///
/// A row that carries any escape sequence ends with [`RESET`], so rows can be
/// printed or re-joined independently without leaking styles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapResult {
    lines: Vec<String>,
}

impl WrapResult {
    fn single(line: String) -> Self {
        Self { lines: vec![line] }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Rows joined with `\n`.
    pub fn join(&self) -> String {
        self.lines.join("\n")
    }
}

/// Lays out one styled line for a column budget.
///
/// ```
/// use termline_ansi::Wrapper;
///
/// let wrapped = Wrapper::new(8).padding(2).wrap("aaa bbb ccc ddd");
/// assert_eq!(wrapped.lines(), ["aaa bbb", "  ccc", "  ddd"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Wrapper<'a> {
    columns: usize,
    padding: usize,
    labels: &'a [&'a str],
}

impl<'a> Wrapper<'a> {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            padding: 0,
            labels: &[],
        }
    }

    /// Indent for every continuation row.
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Uppercase labels that mark a line for truncation instead of wrapping.
    /// Matching ignores ASCII case.
    pub fn labels(mut self, labels: &'a [&'a str]) -> Self {
        self.labels = labels;
        self
    }

    pub fn wrap(&self, line: &str) -> WrapResult {
        if self.columns == 0 || visible_width(line) <= self.columns {
            return WrapResult::single(line.to_string());
        }

        if self.starts_with_label(line) {
            trace!(columns = self.columns, "truncating labeled line");
            let max_length = self.columns.saturating_sub(TRUNCATE_MARGIN);
            return WrapResult::single(truncate_with_ellipsis(line, max_length));
        }

        trace!(columns = self.columns, padding = self.padding, "wrapping line");
        WrapResult {
            lines: self.wrap_styled(line),
        }
    }

    fn starts_with_label(&self, line: &str) -> bool {
        let plain = strip_ansi(line);
        LABEL_PATTERN
            .captures(&plain)
            .and_then(|caps| caps.get(1))
            .map_or(false, |word| {
                self.labels
                    .iter()
                    .any(|label| label.eq_ignore_ascii_case(word.as_str()))
            })
    }

    fn wrap_styled(&self, line: &str) -> Vec<String> {
        // Plain text plus every token anchored at the char offset it precedes.
        let mut plain = String::with_capacity(line.len());
        let mut anchors: Vec<(usize, StyleToken)> = Vec::new();
        let mut offset = 0usize;
        for segment in tokenize(line) {
            match segment {
                Segment::Text(run) => {
                    plain.push_str(run);
                    offset += run.chars().count();
                }
                Segment::Style(token) => anchors.push((offset, token)),
            }
        }

        let content = plain.trim_start();
        if content.is_empty() {
            return vec![line.to_string()];
        }
        let prefix = &plain[..plain.len() - content.len()];
        let indent_width = if self.padding < self.columns {
            self.padding
        } else {
            0
        };
        let indent = " ".repeat(indent_width);

        let options = Options::new(self.columns)
            .initial_indent(prefix)
            .subsequent_indent(&indent)
            .break_words(false)
            .word_separator(WordSeparator::AsciiSpace)
            .word_splitter(WordSplitter::NoHyphenation)
            .wrap_algorithm(WrapAlgorithm::FirstFit);
        let rows: Vec<Vec<char>> = textwrap::wrap(content, &options)
            .iter()
            .map(|row| row.chars().collect())
            .collect();
        if rows.is_empty() {
            return vec![line.to_string()];
        }

        let positions = locate(&plain, &rows, indent_width);
        replay(&rows, indent_width, &anchors, &positions)
    }
}

/// Map every char of `plain` (plus the end of text) to its `(row, column)`
/// in the wrapped rows. Whitespace dropped at a break maps to the end of the
/// row it was dropped from.
fn locate(plain: &str, rows: &[Vec<char>], indent: usize) -> Vec<(usize, usize)> {
    let mut positions = Vec::with_capacity(plain.len() + 1);
    let (mut row, mut col) = (0usize, 0usize);

    for ch in plain.chars() {
        loop {
            let current = &rows[row];
            if col < current.len() && current[col] == ch {
                positions.push((row, col));
                col += 1;
                break;
            }
            if ch.is_whitespace() {
                positions.push((row, col.min(current.len())));
                break;
            }
            if row + 1 < rows.len() {
                row += 1;
                col = indent.min(rows[row].len());
                continue;
            }
            positions.push((row, current.len()));
            break;
        }
    }

    positions.push((row, col.min(rows[row].len())));
    positions
}

/// Rebuild styled rows from the wrapped plain rows, inserting each token at
/// its mapped position and carrying the active style onto continuation rows.
fn replay(
    rows: &[Vec<char>],
    indent: usize,
    anchors: &[(usize, StyleToken)],
    positions: &[(usize, usize)],
) -> Vec<String> {
    let last = positions.len() - 1;
    let mut pending = anchors
        .iter()
        .map(|(offset, token)| (positions[(*offset).min(last)], token))
        .peekable();
    let mut state = StyleState::new();
    let mut lines = Vec::with_capacity(rows.len());

    for (row_idx, row) in rows.iter().enumerate() {
        let start = if row_idx == 0 { 0 } else { indent.min(row.len()) };
        let mut line: String = row[..start].iter().collect();
        if row_idx > 0 && state.is_active() {
            line.push_str(&state.escape());
        }

        for col in start..=row.len() {
            while let Some(&(position, token)) = pending.peek() {
                if position > (row_idx, col) {
                    break;
                }
                line.push_str(&token.escape());
                state.apply(token);
                pending.next();
            }
            if let Some(ch) = row.get(col) {
                line.push(*ch);
            }
        }

        if line.contains('\x1b') && !line.ends_with(RESET) {
            line.push_str(RESET);
        }
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[&str] = &["ERROR", "WARN", "INFO"];

    #[test]
    fn test_short_line_is_returned_unchanged() {
        let line = "\x1b[1;34mINFO\x1b[0m fits";
        let wrapped = Wrapper::new(80).labels(LABELS).wrap(line);
        assert_eq!(wrapped.lines(), [line]);
    }

    #[test]
    fn test_zero_columns_is_noop() {
        let line = "a line much longer than nothing";
        assert_eq!(Wrapper::new(0).wrap(line).lines(), [line]);
    }

    #[test]
    fn test_color_reapplied_on_continuation_rows() {
        let line = "\x1b[31maaa bbb ccc ddd\x1b[0m";
        let wrapped = Wrapper::new(8).padding(2).wrap(line);
        assert_eq!(
            wrapped.lines(),
            [
                "\x1b[31maaa bbb\x1b[0m",
                "  \x1b[31mccc\x1b[0m",
                "  \x1b[31mddd\x1b[0m",
            ]
        );
    }

    #[test]
    fn test_mid_line_color_change_carries_all_active_styles() {
        let line = "\x1b[1mbold \x1b[34mblue words here\x1b[0m";
        let wrapped = Wrapper::new(10).wrap(line);
        assert_eq!(
            wrapped.lines(),
            [
                "\x1b[1mbold \x1b[34mblue\x1b[0m",
                "\x1b[1m\x1b[34mwords here\x1b[0m",
            ]
        );
    }

    #[test]
    fn test_new_foreground_replaces_old_on_continuation() {
        let line = "\x1b[31mred \x1b[32mgreen text wraps\x1b[0m";
        let wrapped = Wrapper::new(10).wrap(line);
        assert_eq!(wrapped.len(), 2);
        assert!(wrapped.lines()[1].starts_with("\x1b[32m"));
        assert!(!wrapped.lines()[1].contains("\x1b[31m"));
    }

    #[test]
    fn test_style_closure_invariant() {
        let line = "\x1b[4munderlined \x1b[41mwith background\x1b[49m and then plain words";
        let wrapped = Wrapper::new(12).padding(1).wrap(line);
        assert!(wrapped.len() > 1);
        for row in wrapped.lines() {
            if row.contains('\x1b') {
                assert!(row.ends_with(RESET), "row not closed: {:?}", row);
            }
            assert!(visible_width(row) <= 12, "row too wide: {:?}", row);
        }
    }

    #[test]
    fn test_leading_whitespace_kept_on_first_row() {
        let wrapped = Wrapper::new(12).padding(3).wrap("   alpha beta gamma delta");
        assert_eq!(wrapped.lines(), ["   alpha", "   beta", "   gamma", "   delta"]);
    }

    #[test]
    fn test_unsplittable_word_passes_through() {
        let long = "x".repeat(30);
        let line = format!("short {}", long);
        let wrapped = Wrapper::new(10).wrap(&line);
        assert_eq!(wrapped.lines(), ["short".to_string(), long]);
    }

    #[test]
    fn test_labeled_line_is_truncated() {
        let line = format!("\x1b[1m\x1b[34mINFO\x1b[0m {}", "word ".repeat(20));
        let wrapped = Wrapper::new(20).labels(LABELS).wrap(&line);
        assert_eq!(wrapped.len(), 1);
        let row = &wrapped.lines()[0];
        assert!(row.ends_with("..."));
        assert!(visible_width(row) - 3 <= 20 - 2 - 3);
    }

    #[test]
    fn test_indented_label_is_detected() {
        let line = format!("   WARN {}", "careful ".repeat(10));
        let wrapped = Wrapper::new(30).labels(LABELS).wrap(&line);
        assert_eq!(wrapped.len(), 1);
        assert!(wrapped.lines()[0].starts_with("   WARN careful"));
    }

    #[test]
    fn test_unknown_label_wraps() {
        let line = format!("NOTE {}", "plenty of words ".repeat(4));
        let wrapped = Wrapper::new(20).labels(LABELS).wrap(&line);
        assert!(wrapped.len() > 1);
    }

    #[test]
    fn test_join_uses_newlines() {
        let wrapped = Wrapper::new(8).wrap("aaa bbb ccc");
        assert_eq!(wrapped.join(), "aaa bbb\nccc");
    }
}
