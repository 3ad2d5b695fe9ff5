//! Reporter options and the `termline.toml` loader.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReporterError;
use crate::layout::Profile;
use crate::record::LogType;
use crate::session::{BreakPolicy, LineBreakBehavior};

/// The config file name
pub const CONFIG_FILE_NAME: &str = "termline.toml";

/// Construction-time options shared by both layouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReporterOptions {
    /// Layout profile
    pub profile: Profile,
    /// Types rendered dim regardless of their color
    pub dim_types: Vec<LogType>,
    pub line_break_behavior: LineBreakBehavior,
    #[serde(with = "humantime_serde")]
    pub line_break_time_threshold: Duration,
    #[serde(with = "humantime_serde")]
    pub session_duration: Duration,
    /// Paint the message body with its type color; profile default when unset
    pub colorize_message: Option<bool>,
    /// Minimum label column width; profile default when unset
    pub padding: Option<usize>,
    pub date_first_position: bool,
    pub add_type_colon: bool,
    /// Terminal supports unicode glyphs
    pub unicode: bool,
    /// Container profile: glyph labels instead of words
    pub icons: bool,
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            profile: Profile::Default,
            dim_types: vec![LogType::Trace, LogType::Verbose],
            line_break_behavior: LineBreakBehavior::Auto,
            line_break_time_threshold: Duration::from_secs(1),
            session_duration: Duration::from_secs(5),
            colorize_message: None,
            padding: None,
            date_first_position: true,
            add_type_colon: false,
            unicode: true,
            icons: false,
        }
    }
}

impl ReporterOptions {
    /// Defaults for the container profile.
    pub fn container() -> Self {
        Self {
            profile: Profile::Container,
            ..Default::default()
        }
    }

    /// Load options from `termline.toml` in `dir`.
    ///
    /// Returns:
    /// - `Ok(Some(options))` if the file exists and parses
    /// - `Ok(None)` if there is no file
    /// - `Err(...)` if the file exists but cannot be read or parsed
    pub fn load(dir: &Path) -> Result<Option<Self>, ReporterError> {
        let path = dir.join(CONFIG_FILE_NAME);

        if !path.exists() {
            debug!(path = %path.display(), "no reporter config file");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| {
            ReporterError::ConfigRead {
                path: path.clone(),
                source,
            }
        })?;

        let options = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), profile = %options.profile, "loaded reporter config");
        Ok(Some(options))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ReporterError> {
        Ok(toml::from_str(content)?)
    }

    /// Effective label column width.
    pub fn padding(&self) -> usize {
        self.padding.unwrap_or(match self.profile {
            Profile::Default => 6,
            Profile::Container => 4,
        })
    }

    /// Whether the message body is painted with the type's message color.
    pub fn colorize_message(&self) -> bool {
        self.colorize_message
            .unwrap_or(self.profile == Profile::Container)
    }

    pub fn is_dimmed(&self, kind: &LogType) -> bool {
        self.dim_types.contains(kind)
    }

    pub fn break_policy(&self) -> BreakPolicy {
        BreakPolicy {
            behavior: self.line_break_behavior,
            line_break_threshold: self.line_break_time_threshold,
            session_duration: self.session_duration,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_line_break_behavior(mut self, behavior: LineBreakBehavior) -> Self {
        self.line_break_behavior = behavior;
        self
    }

    pub fn with_dim_types(mut self, dim_types: Vec<LogType>) -> Self {
        self.dim_types = dim_types;
        self
    }

    pub fn with_colorize_message(mut self, colorize: bool) -> Self {
        self.colorize_message = Some(colorize);
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_date_first_position(mut self, first: bool) -> Self {
        self.date_first_position = first;
        self
    }

    pub fn with_add_type_colon(mut self, colon: bool) -> Self {
        self.add_type_colon = colon;
        self
    }

    pub fn with_unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    pub fn with_icons(mut self, icons: bool) -> Self {
        self.icons = icons;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let default = ReporterOptions::default();
        assert_eq!(default.padding(), 6);
        assert!(!default.colorize_message());

        let container = ReporterOptions::container();
        assert_eq!(container.padding(), 4);
        assert!(container.colorize_message());
        assert!(container.is_dimmed(&LogType::Trace));
        assert!(!container.is_dimmed(&LogType::Info));
    }

    #[test]
    fn test_explicit_values_win() {
        let options = ReporterOptions::container()
            .with_padding(10)
            .with_colorize_message(false);
        assert_eq!(options.padding(), 10);
        assert!(!options.colorize_message());
    }

    #[test]
    fn test_parse_full_file() {
        let options = ReporterOptions::from_toml_str(
            r#"
profile = "container"
dim_types = ["debug"]
line_break_behavior = "always"
line_break_time_threshold = "250ms"
session_duration = "10s"
padding = 8
add_type_colon = true
icons = true
"#,
        )
        .unwrap();
        assert_eq!(options.profile, Profile::Container);
        assert_eq!(options.dim_types, vec![LogType::Debug]);
        let policy = options.break_policy();
        assert_eq!(policy.behavior, LineBreakBehavior::Always);
        assert_eq!(policy.line_break_threshold, Duration::from_millis(250));
        assert_eq!(policy.session_duration, Duration::from_secs(10));
        assert_eq!(options.padding(), 8);
        assert!(options.add_type_colon);
        assert!(options.icons);
        assert!(options.unicode);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = ReporterOptions::from_toml_str("colour = true");
        assert!(matches!(result, Err(ReporterError::ConfigParse(_))));
    }
}
