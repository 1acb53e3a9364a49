use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the timer produces an `Event`.
/// The hosting shell subscribes to these; nothing is polled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// One-second countdown step while running.
    Tick {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Fires once per second while 1..=3 seconds remain. Informational
    /// only; never alters state and never fires on the zero-reaching tick.
    NearCompletion {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Fires exactly once per countdown reaching zero, after the cycle has
    /// advanced and the next phase's duration has been loaded. The next
    /// phase starts paused.
    PhaseCompleted {
        now_is_break: bool,
        phase: Phase,
        completed_focus_sessions: u32,
        next_duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Manual +/- adjustment was applied (rejected adjustments are silent).
    TimerAdjusted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Full state for late subscribers and status queries.
    StateSnapshot {
        phase: Phase,
        running: bool,
        remaining_secs: u64,
        completed_focus_sessions: u32,
        at: DateTime<Utc>,
    },
}
