//! Work/break cycle policy.
//!
//! [`BreakCycle`] carries the session-cycle state; the actual transition is
//! the pure [`advance`] function, so the policy can be tested (and previewed)
//! without a timer attached.

use serde::{Deserialize, Serialize};

/// Phases of the focus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(self) -> bool {
        !matches!(self, Phase::Focus)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Nominal phase durations, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDurations {
    pub focus_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
    /// Every n-th completed focus session earns the long break.
    pub sessions_before_long_break: u32,
}

impl CycleDurations {
    pub fn for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Focus => self.focus_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for CycleDurations {
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            sessions_before_long_break: 4,
        }
    }
}

/// Outcome of one phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub phase: Phase,
    pub duration_secs: u64,
    pub completed_focus_sessions: u32,
}

/// Pure transition function mapping "phase just ended" to the next phase.
///
/// A finished focus session increments the completed count first; the
/// long-break check uses the post-increment value, so the 4th, 8th, ...
/// completed session is followed by a long break. A finished break always
/// returns to focus and leaves the count untouched.
pub fn advance(
    ended: Phase,
    completed_focus_sessions: u32,
    durations: &CycleDurations,
) -> Transition {
    if ended.is_break() {
        return Transition {
            phase: Phase::Focus,
            duration_secs: durations.focus_secs,
            completed_focus_sessions,
        };
    }

    let completed = completed_focus_sessions.saturating_add(1);
    let cadence = durations.sessions_before_long_break.max(1);
    let next = if completed % cadence == 0 {
        Phase::LongBreak
    } else {
        Phase::ShortBreak
    };
    Transition {
        phase: next,
        duration_secs: durations.for_phase(next),
        completed_focus_sessions: completed,
    }
}

/// Cyclical work/break state.
///
/// Advanced only by natural countdown completion; manual reset and manual
/// adjustment never touch it. Cleared only by an explicit cycle reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakCycle {
    phase: Phase,
    completed_focus_sessions: u32,
}

impl BreakCycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Focus,
            completed_focus_sessions: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_break(&self) -> bool {
        self.phase.is_break()
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus_sessions
    }

    /// Move to the next phase after the current one ended naturally.
    pub fn advance(&mut self, durations: &CycleDurations) -> Transition {
        let transition = advance(self.phase, self.completed_focus_sessions, durations);
        self.phase = transition.phase;
        self.completed_focus_sessions = transition.completed_focus_sessions;
        transition
    }

    /// Back to a fresh focus cycle with no completed sessions.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for BreakCycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_then_short_break() {
        let durations = CycleDurations::default();
        let t = advance(Phase::Focus, 0, &durations);
        assert_eq!(t.phase, Phase::ShortBreak);
        assert_eq!(t.duration_secs, 300);
        assert_eq!(t.completed_focus_sessions, 1);
    }

    #[test]
    fn fourth_session_earns_long_break() {
        let durations = CycleDurations::default();
        let t = advance(Phase::Focus, 3, &durations);
        assert_eq!(t.phase, Phase::LongBreak);
        assert_eq!(t.duration_secs, 900);
        assert_eq!(t.completed_focus_sessions, 4);
    }

    #[test]
    fn break_returns_to_focus_without_counting() {
        let durations = CycleDurations::default();
        for ended in [Phase::ShortBreak, Phase::LongBreak] {
            let t = advance(ended, 2, &durations);
            assert_eq!(t.phase, Phase::Focus);
            assert_eq!(t.duration_secs, durations.focus_secs);
            assert_eq!(t.completed_focus_sessions, 2);
        }
    }

    #[test]
    fn four_full_cycles_yield_short_short_short_long() {
        let durations = CycleDurations::default();
        let mut cycle = BreakCycle::new();
        let mut breaks = Vec::new();
        for _ in 0..4 {
            let t = cycle.advance(&durations); // focus ends
            breaks.push(t.phase);
            cycle.advance(&durations); // break ends
        }
        assert_eq!(
            breaks,
            vec![
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak
            ]
        );
        assert_eq!(cycle.completed_focus_sessions(), 4);
        assert_eq!(cycle.phase(), Phase::Focus);
    }

    #[test]
    fn custom_cadence_is_honoured() {
        let durations = CycleDurations {
            sessions_before_long_break: 2,
            ..CycleDurations::default()
        };
        let mut cycle = BreakCycle::new();
        assert_eq!(cycle.advance(&durations).phase, Phase::ShortBreak);
        cycle.advance(&durations);
        assert_eq!(cycle.advance(&durations).phase, Phase::LongBreak);
    }

    #[test]
    fn reset_clears_progress() {
        let durations = CycleDurations::default();
        let mut cycle = BreakCycle::new();
        cycle.advance(&durations);
        cycle.reset();
        assert_eq!(cycle.phase(), Phase::Focus);
        assert_eq!(cycle.completed_focus_sessions(), 0);
    }
}
