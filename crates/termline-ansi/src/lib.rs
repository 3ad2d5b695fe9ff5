//! # termline-ansi
//!
//! ANSI-aware line layout for termline.
//!
//! This crate knows nothing about log records. It takes a single line of text
//! interleaved with SGR escape sequences and lays it out for a fixed column
//! budget without corrupting the escape sequences.
//!
//! ## Key Types
//!
//! - [`StyleToken`] - One classified SGR code (foreground, background, ...)
//! - [`StyleState`] - Active foreground/background/attribute set
//! - [`Wrapper`] - Word wrap with color continuity, or truncation for labeled lines
//! - [`WrapResult`] - Wrapped lines, each closed with a reset
//!
//! ## Strategies
//!
//! - Lines that fit are returned unchanged.
//! - Lines starting with a known uppercase label are truncated with `...`.
//! - Everything else is word wrapped and the styles are replayed per line.

mod state;
mod token;
mod truncate;
mod wrap;

pub use state::StyleState;
pub use token::{strip_ansi, tokenize, visible_width, Attribute, Segment, StyleToken, RESET};
pub use truncate::{truncate_with_ellipsis, ELLIPSIS};
pub use wrap::{WrapResult, Wrapper};
