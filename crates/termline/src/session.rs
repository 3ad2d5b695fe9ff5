//! Blank-line policy between consecutive records.
//!
//! The state is a plain value: [`SessionState::advance`] consumes the current
//! state and returns the decision together with the next state, so the policy
//! can be exercised without a reporter.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::record::{LogType, StreamType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreakBehavior {
    /// Break on time gaps and on transitions involving important types
    #[default]
    Auto,
    /// Never break (first record and new sessions still do)
    None,
    /// Break before every record but the first
    Always,
}

impl std::str::FromStr for LineBreakBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(LineBreakBehavior::Auto),
            "none" => Ok(LineBreakBehavior::None),
            "always" => Ok(LineBreakBehavior::Always),
            _ => Err(format!("Unknown line break behavior: {}", s)),
        }
    }
}

/// Thresholds for the break decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakPolicy {
    pub behavior: LineBreakBehavior,
    /// Gap after which `auto` mode breaks regardless of types
    pub line_break_threshold: Duration,
    /// Gap after which a new session starts and a break is forced
    pub session_duration: Duration,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            behavior: LineBreakBehavior::Auto,
            line_break_threshold: Duration::from_millis(1000),
            session_duration: Duration::from_millis(5000),
        }
    }
}

/// Why a record did or did not get a leading blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    FirstLog,
    NewSession,
    Separator,
    Always,
    TimeGap,
    TypeChange,
    Continuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakDecision {
    pub leading_blank: bool,
    pub trailing_blank: bool,
    pub reason: BreakReason,
}

/// Timing and type of the previous write, shared by both output streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    last_type: Option<LogType>,
    last_write_ms: i64,
    first_log: bool,
    target: Option<StreamType>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            last_type: None,
            last_write_ms: 0,
            first_log: true,
            target: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_first_log(&self) -> bool {
        self.first_log
    }

    pub fn last_type(&self) -> Option<&LogType> {
        self.last_type.as_ref()
    }

    pub fn last_write_ms(&self) -> i64 {
        self.last_write_ms
    }

    /// Stream the previous record was written to.
    pub fn target(&self) -> Option<StreamType> {
        self.target
    }

    /// Decide the blank lines around a record written at `now_ms` and
    /// return the state that follows it.
    pub fn advance(
        self,
        policy: &BreakPolicy,
        kind: &LogType,
        separator: bool,
        stream: StreamType,
        now_ms: i64,
    ) -> (BreakDecision, SessionState) {
        let elapsed = now_ms.saturating_sub(self.last_write_ms);
        let exceeds = |limit: Duration| elapsed > i64::try_from(limit.as_millis()).unwrap_or(i64::MAX);

        let reason = if self.first_log {
            BreakReason::FirstLog
        } else if exceeds(policy.session_duration) {
            BreakReason::NewSession
        } else if separator {
            BreakReason::Separator
        } else {
            match (policy.behavior, &self.last_type) {
                (_, None) | (LineBreakBehavior::None, _) => BreakReason::Continuation,
                (LineBreakBehavior::Always, Some(_)) => BreakReason::Always,
                (LineBreakBehavior::Auto, Some(_)) if exceeds(policy.line_break_threshold) => {
                    BreakReason::TimeGap
                }
                (LineBreakBehavior::Auto, Some(last))
                    if kind != last && (kind.is_important() || last.is_important()) =>
                {
                    BreakReason::TypeChange
                }
                (LineBreakBehavior::Auto, Some(_)) => BreakReason::Continuation,
            }
        };

        let decision = BreakDecision {
            leading_blank: reason != BreakReason::Continuation,
            trailing_blank: separator,
            reason,
        };
        let next = SessionState {
            last_type: Some(kind.clone()),
            last_write_ms: now_ms,
            first_log: false,
            target: Some(stream),
        };
        (decision, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_000_000;

    fn step(
        state: SessionState,
        policy: &BreakPolicy,
        kind: LogType,
        at: i64,
    ) -> (BreakDecision, SessionState) {
        state.advance(policy, &kind, false, StreamType::Stdout, at)
    }

    fn warmed_up(policy: &BreakPolicy, kind: LogType) -> SessionState {
        step(SessionState::new(), policy, kind, START).1
    }

    #[test]
    fn test_first_log_always_breaks() {
        for behavior in [
            LineBreakBehavior::Auto,
            LineBreakBehavior::None,
            LineBreakBehavior::Always,
        ] {
            let policy = BreakPolicy {
                behavior,
                ..Default::default()
            };
            let (decision, next) = step(SessionState::new(), &policy, LogType::Log, START);
            assert!(decision.leading_blank);
            assert_eq!(decision.reason, BreakReason::FirstLog);
            assert!(!next.is_first_log());
            assert_eq!(next.last_type(), Some(&LogType::Log));
            assert_eq!(next.last_write_ms(), START);
        }
    }

    #[test]
    fn test_new_session_after_long_gap() {
        let policy = BreakPolicy {
            behavior: LineBreakBehavior::None,
            ..Default::default()
        };
        let state = warmed_up(&policy, LogType::Log);
        let (decision, _) = step(state, &policy, LogType::Log, START + 5001);
        assert_eq!(decision.reason, BreakReason::NewSession);
    }

    #[test]
    fn test_none_never_breaks_within_session() {
        let policy = BreakPolicy {
            behavior: LineBreakBehavior::None,
            ..Default::default()
        };
        let state = warmed_up(&policy, LogType::Info);
        let (decision, _) = step(state, &policy, LogType::Error, START + 3000);
        assert!(!decision.leading_blank);
    }

    #[test]
    fn test_always_breaks_after_previous_record() {
        let policy = BreakPolicy {
            behavior: LineBreakBehavior::Always,
            ..Default::default()
        };
        let state = warmed_up(&policy, LogType::Info);
        let (decision, _) = step(state, &policy, LogType::Info, START + 1);
        assert!(decision.leading_blank);
        assert_eq!(decision.reason, BreakReason::Always);
    }

    #[test]
    fn test_auto_breaks_on_time_gap() {
        let policy = BreakPolicy::default();
        let state = warmed_up(&policy, LogType::Log);
        let (decision, _) = step(state.clone(), &policy, LogType::Log, START + 1001);
        assert_eq!(decision.reason, BreakReason::TimeGap);
        let (decision, _) = step(state, &policy, LogType::Log, START + 1000);
        assert!(!decision.leading_blank);
    }

    #[test]
    fn test_auto_breaks_on_important_type_change() {
        let policy = BreakPolicy::default();

        let state = warmed_up(&policy, LogType::Log);
        let (decision, _) = step(state, &policy, LogType::Warn, START + 10);
        assert_eq!(decision.reason, BreakReason::TypeChange);

        let state = warmed_up(&policy, LogType::Success);
        let (decision, _) = step(state, &policy, LogType::Debug, START + 10);
        assert_eq!(decision.reason, BreakReason::TypeChange);

        let state = warmed_up(&policy, LogType::Debug);
        let (decision, _) = step(state, &policy, LogType::Trace, START + 10);
        assert!(!decision.leading_blank);

        let state = warmed_up(&policy, LogType::Info);
        let (decision, _) = step(state, &policy, LogType::Info, START + 10);
        assert!(!decision.leading_blank);
    }

    #[test]
    fn test_separator_breaks_both_sides() {
        let policy = BreakPolicy {
            behavior: LineBreakBehavior::None,
            ..Default::default()
        };
        let state = warmed_up(&policy, LogType::Log);
        let (decision, _) = state.advance(&policy, &LogType::Log, true, StreamType::Stdout, START + 5);
        assert!(decision.leading_blank);
        assert!(decision.trailing_blank);
        assert_eq!(decision.reason, BreakReason::Separator);
    }

    #[test]
    fn test_target_stream_is_recorded() {
        let (_, next) = SessionState::new().advance(
            &BreakPolicy::default(),
            &LogType::Error,
            false,
            StreamType::Stderr,
            START,
        );
        assert_eq!(next.target(), Some(StreamType::Stderr));
    }
}
