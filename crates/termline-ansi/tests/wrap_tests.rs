use termline_ansi::{strip_ansi, visible_width, Wrapper, RESET};

const LABELS: &[&str] = &["ERROR", "WARN", "INFO", "SUCCESS", "DEBUG"];

/// A handful of styled lines with mixed colors, attributes and resets.
fn sample_lines() -> Vec<String> {
    vec![
        format!(
            "\x1b[31m{}\x1b[0m",
            "the quick brown fox jumps over the lazy dog ".repeat(4)
        ),
        format!(
            "   \x1b[90m{}\x1b[0m \x1b[1;32m{}\x1b[22m tail end of the line",
            "dim gray words".repeat(3),
            "bold green section"
        ),
        format!(
            "\x1b[4m\x1b[44munderline on blue\x1b[24m only blue now {}\x1b[0m",
            "and more text ".repeat(5)
        ),
        "plain text without any styling at all that is quite long indeed".to_string(),
    ]
}

#[test]
fn test_rows_respect_column_budget() {
    for columns in [20, 33, 48] {
        for line in sample_lines() {
            let wrapped = Wrapper::new(columns).padding(4).labels(LABELS).wrap(&line);
            for row in wrapped.lines() {
                let plain = strip_ansi(row);
                let single_word = !plain.trim().contains(' ');
                assert!(
                    visible_width(row) <= columns || single_word,
                    "row wider than {}: {:?}",
                    columns,
                    row
                );
            }
        }
    }
}

#[test]
fn test_styled_rows_are_closed() {
    for line in sample_lines() {
        let wrapped = Wrapper::new(25).padding(2).labels(LABELS).wrap(&line);
        for row in wrapped.lines() {
            if row.contains('\x1b') {
                assert!(row.ends_with(RESET), "unclosed row: {:?}", row);
            }
        }
    }
}

#[test]
fn test_wrapping_preserves_words() {
    for line in sample_lines() {
        let wrapped = Wrapper::new(30).padding(2).wrap(&line);
        let original: Vec<String> = strip_ansi(&line)
            .split_whitespace()
            .map(String::from)
            .collect();
        let rewrapped: Vec<String> = wrapped
            .lines()
            .iter()
            .flat_map(|row| {
                strip_ansi(row)
                    .split_whitespace()
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .collect();
        assert_eq!(original, rewrapped);
    }
}

#[test]
fn test_fast_path_is_byte_identical() {
    let line = "\x1b[1;31mERROR\x1b[0m \x1b[2mshort\x1b[22m";
    let wrapped = Wrapper::new(40).labels(LABELS).wrap(line);
    assert_eq!(wrapped.into_lines(), vec![line.to_string()]);
}

#[test]
fn test_truncation_bound_for_labeled_lines() {
    let columns = 40;
    let line = format!(
        "   \x1b[1m\x1b[34mINFO\x1b[0m \x1b[34m{}\x1b[0m",
        "message ".repeat(12)
    );
    let wrapped = Wrapper::new(columns).padding(8).labels(LABELS).wrap(&line);
    assert_eq!(wrapped.len(), 1);

    let row = &wrapped.lines()[0];
    let without_ellipsis = strip_ansi(row).trim_end_matches("...").to_string();
    assert!(without_ellipsis.chars().count() <= columns - 2 - 3);
    assert!(row.ends_with(&format!("...{}", RESET)));
}
