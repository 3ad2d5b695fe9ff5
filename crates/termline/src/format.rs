use std::path::MAIN_SEPARATOR;

use chrono::{DateTime, Local};
use colored::Colorize;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::warn;

use crate::record::{ErrorValue, FormatOptions, LogArg};
use crate::style;

/// Deepest cause nesting rendered for an error argument.
pub const MAX_ERROR_DEPTH: usize = 8;

lazy_static! {
    static ref AT_TRACE_PATTERN: Regex = Regex::new(r"^at +").unwrap();
    static ref PARENTHESES_PATTERN: Regex = Regex::new(r"\((.+)\)").unwrap();
    static ref BACKTICK_PATTERN: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref UNDERSCORE_PATTERN: Regex = Regex::new(r"\s+_([^_]+)_\s+").unwrap();
}

/// Render all arguments of a record, separated by single spaces.
pub fn format_args(args: &[LogArg], opts: &FormatOptions) -> String {
    args.iter()
        .map(|arg| format_arg(arg, opts))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_arg(arg: &LogArg, opts: &FormatOptions) -> String {
    match arg {
        LogArg::Text(text) => text.clone(),
        LogArg::Value(serde_json::Value::String(text)) => text.clone(),
        LogArg::Value(value) => value.to_string(),
        LogArg::Error(error) => format_error(error, opts),
    }
}

/// Message, stack frames, then each cause indented one level further.
pub fn format_error(error: &ErrorValue, opts: &FormatOptions) -> String {
    let level = opts.error_level;
    let stack = error
        .stack
        .as_deref()
        .map(|stack| format_stack(stack, level))
        .unwrap_or_default();

    let cause_prefix = if level > 0 {
        format!("{}[cause]: ", "  ".repeat(level))
    } else {
        String::new()
    };

    let cause = match &error.cause {
        Some(cause) if level + 1 < MAX_ERROR_DEPTH => {
            format!("\n\n{}", format_error(cause, &opts.nested()))
        }
        Some(_) => {
            warn!(depth = level + 1, "error cause chain truncated");
            String::new()
        }
        None => String::new(),
    };

    format!("{}{}\n{}{}", cause_prefix, error.message, stack, cause)
}

pub fn format_stack(stack: &str, error_level: usize) -> String {
    let cwd = std::env::current_dir()
        .map(|dir| format!("{}{}", dir.display(), MAIN_SEPARATOR))
        .unwrap_or_default();
    format_stack_in(stack, error_level, &cwd)
}

fn format_stack_in(stack: &str, error_level: usize, cwd: &str) -> String {
    let indent = "  ".repeat(error_level + 1);
    let frames: Vec<String> = parse_stack(stack, cwd)
        .iter()
        .map(|frame| format_stack_line(frame))
        .collect();
    format!("\n{}{}", indent, frames.join(&format!("\n{}", indent)))
}

/// Stack frames without the header line, trimmed and made relative to `cwd`.
pub fn parse_stack(stack: &str, cwd: &str) -> Vec<String> {
    stack
        .lines()
        .skip(1)
        .map(|line| {
            let line = line.trim().replacen("file://", "", 1);
            if cwd.is_empty() {
                line
            } else {
                line.replacen(cwd, "", 1)
            }
        })
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn format_stack_line(line: &str) -> String {
    let line = AT_TRACE_PATTERN.replace(line, |caps: &Captures| style::gray(&caps[0]));
    let line = PARENTHESES_PATTERN.replace(&line, |caps: &Captures| {
        format!("({})", style::accent(&caps[1]))
    });
    format!("  {}", line)
}

/// Gray `[DD/MM/YYYY HH:MM:SS]`.
pub fn format_timestamp(date: &DateTime<Local>) -> String {
    style::gray(&format!("[{}]", date.format("%d/%m/%Y %H:%M:%S")))
}

/// Box content formatting: `` `code` `` in cyan, ` _word_ ` underlined.
pub fn character_format(content: &str) -> String {
    let content = BACKTICK_PATTERN.replace_all(content, |caps: &Captures| style::accent(&caps[1]));
    UNDERSCORE_PATTERN
        .replace_all(&content, |caps: &Captures| {
            format!(" {} ", caps[1].underline())
        })
        .into_owned()
}
