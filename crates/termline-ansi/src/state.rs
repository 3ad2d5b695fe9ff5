use std::collections::BTreeSet;

use crate::token::{Attribute, StyleToken};

/// The styles in effect at some point of a line.
///
/// At most one foreground and one background are active; a new color of the
/// same class replaces the previous one. Attributes accumulate until their
/// own reset code or a full reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleState {
    foreground: Option<String>,
    background: Option<String>,
    attributes: BTreeSet<Attribute>,
}

impl StyleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, token: &StyleToken) {
        match token {
            // 39/49 select the terminal default, which is the same as no color.
            StyleToken::Foreground(params) if params == "39" => self.foreground = None,
            StyleToken::Background(params) if params == "49" => self.background = None,
            StyleToken::Foreground(params) => self.foreground = Some(params.clone()),
            StyleToken::Background(params) => self.background = Some(params.clone()),
            StyleToken::Attribute(attr) => {
                self.attributes.insert(*attr);
            }
            StyleToken::AttributeReset(code) => {
                self.attributes.retain(|attr| !attr.is_cleared_by(*code));
            }
            StyleToken::Reset => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.foreground = None;
        self.background = None;
        self.attributes.clear();
    }

    pub fn is_active(&self) -> bool {
        self.foreground.is_some() || self.background.is_some() || !self.attributes.is_empty()
    }

    pub fn foreground(&self) -> Option<&str> {
        self.foreground.as_deref()
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.attributes.iter().copied()
    }

    /// Escape sequences that re-establish this state on a fresh line:
    /// attributes first, then background, then foreground.
    pub fn escape(&self) -> String {
        let mut out = String::new();
        for attr in &self.attributes {
            out.push_str(&StyleToken::Attribute(*attr).escape());
        }
        if let Some(bg) = &self.background {
            out.push_str(&StyleToken::Background(bg.clone()).escape());
        }
        if let Some(fg) = &self.foreground {
            out.push_str(&StyleToken::Foreground(fg.clone()).escape());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_replaces_previous() {
        let mut state = StyleState::new();
        state.apply(&StyleToken::Foreground("31".into()));
        state.apply(&StyleToken::Foreground("34".into()));
        assert_eq!(state.foreground(), Some("34"));
        assert_eq!(state.escape(), "\x1b[34m");
    }

    #[test]
    fn test_attributes_accumulate_and_reset_individually() {
        let mut state = StyleState::new();
        state.apply(&StyleToken::Attribute(Attribute::Bold));
        state.apply(&StyleToken::Attribute(Attribute::Underline));
        state.apply(&StyleToken::AttributeReset(22));
        assert_eq!(state.attributes().collect::<Vec<_>>(), vec![Attribute::Underline]);
        state.apply(&StyleToken::AttributeReset(24));
        assert!(!state.is_active());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = StyleState::new();
        state.apply(&StyleToken::Attribute(Attribute::Dim));
        state.apply(&StyleToken::Background("41".into()));
        state.apply(&StyleToken::Foreground("30".into()));
        assert_eq!(state.escape(), "\x1b[2m\x1b[41m\x1b[30m");
        state.apply(&StyleToken::Reset);
        assert!(!state.is_active());
        assert_eq!(state.escape(), "");
    }

    #[test]
    fn test_default_color_codes_clear_class() {
        let mut state = StyleState::new();
        state.apply(&StyleToken::Foreground("31".into()));
        state.apply(&StyleToken::Background("44".into()));
        state.apply(&StyleToken::Foreground("39".into()));
        assert_eq!(state.foreground(), None);
        assert_eq!(state.background(), Some("44"));
    }
}
