//! # termline
//!
//! Terminal reporters for structured log records.
//!
//! A [`Reporter`] takes the records produced by a logging facade, renders
//! them with one of two layout profiles and writes them to stdout or stderr
//! depending on severity. Blank lines between records follow a small break
//! policy driven by record types and timing.
//!
//! ## Key Types
//!
//! - [`LogRecord`] - One event from the facade (arguments, type, tag, level, date)
//! - [`Reporter`] - Formats, spaces and writes records
//! - [`ReporterOptions`] - Construction-time options, loadable from `termline.toml`
//! - [`Layout`] - Rendering strategy of a [`Profile`]
//! - [`SessionState`] - Previous type, write time and target stream
//!
//! ## Markup
//!
//! Message text may contain `{{emphasis}}` and horizontal rules such as
//! `[[50%]]`, `[[20|=]]`, `[[full]]` or `[[-]]`. See [`markup`].

pub mod assembly;
pub mod boxed;
pub mod config;
pub mod error;
pub mod format;
pub mod layout;
pub mod markup;
pub mod record;
pub mod reporter;
pub mod session;
pub mod style;

pub use assembly::assemble_line;
pub use boxed::{render_box, BorderStyle, BoxOptions};
pub use config::{ReporterOptions, CONFIG_FILE_NAME};
pub use error::ReporterError;
pub use layout::{ContainerLayout, DefaultLayout, Layout, Profile};
pub use record::{
    ErrorValue, FormatOptions, LogArg, LogRecord, LogType, StreamType, DEFAULT_COLUMNS,
    SEPARATOR_MARKER,
};
pub use reporter::{Rendered, Reporter};
pub use session::{BreakDecision, BreakPolicy, BreakReason, LineBreakBehavior, SessionState};

pub use termline_ansi::{WrapResult, Wrapper};
