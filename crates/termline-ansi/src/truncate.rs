use unicode_width::UnicodeWidthChar;

use crate::state::StyleState;
use crate::token::{tokenize, Segment, RESET};

pub const ELLIPSIS: &str = "...";

/// Cut a styled line so that it occupies at most `max_length` columns
/// including the trailing [`ELLIPSIS`].
///
/// Style tokens are copied through without being counted. The ellipsis is
/// written in whatever style is active at the cut point and the line is then
/// closed with a reset. A budget too small to hold any text returns the input
/// unchanged.
pub fn truncate_with_ellipsis(text: &str, max_length: usize) -> String {
    let limit = max_length.saturating_sub(ELLIPSIS.len());
    if limit == 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + ELLIPSIS.len() + RESET.len());
    let mut state = StyleState::new();
    let mut width = 0usize;

    'segments: for segment in tokenize(text) {
        if width >= limit {
            break;
        }
        match segment {
            Segment::Style(token) => {
                out.push_str(&token.escape());
                state.apply(&token);
            }
            Segment::Text(run) => {
                for ch in run.chars() {
                    let w = ch.width().unwrap_or(0);
                    if width + w > limit {
                        break 'segments;
                    }
                    out.push(ch);
                    width += w;
                }
            }
        }
    }

    out.push_str(ELLIPSIS);
    if state.is_active() {
        out.push_str(RESET);
    }
    out
}
