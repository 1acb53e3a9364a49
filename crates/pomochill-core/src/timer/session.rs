//! Session timer implementation.
//!
//! The timer is a discrete state machine: the owner calls [`SessionTimer::tick`]
//! once per elapsed second while the countdown is running. There is no
//! internal thread; the scoped ticker lives in [`crate::timer::TimerService`].
//!
//! ## State transitions
//!
//! ```text
//! paused --start--> running --tick*--> 0 --> cycle advance, reload, paused
//! ```
//!
//! Every command returns the events it produced, in emission order, for the
//! caller to push outward.

use chrono::Utc;

use crate::events::Event;
use crate::timer::cycle::{BreakCycle, CycleDurations, Phase};

/// Countdown values at or below which each tick emits a warning cue.
pub const NEAR_COMPLETION_WINDOW_SECS: u64 = 3;

/// Smallest remaining time a manual decrease may leave behind. One adjust
/// step by default; a decrease below this is rejected outright so manual
/// adjustment can never trigger completion.
pub const DEFAULT_ADJUST_FLOOR_SECS: u64 = 5 * 60;

/// The authoritative countdown plus its break-cycle state.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    durations: CycleDurations,
    cycle: BreakCycle,
    remaining_secs: u64,
    running: bool,
    adjust_floor_secs: u64,
}

impl SessionTimer {
    /// A paused focus session at its nominal duration.
    pub fn new(durations: CycleDurations) -> Self {
        Self {
            durations,
            cycle: BreakCycle::new(),
            remaining_secs: durations.focus_secs,
            running: false,
            adjust_floor_secs: DEFAULT_ADJUST_FLOOR_SECS,
        }
    }

    pub fn with_adjust_floor(mut self, floor_secs: u64) -> Self {
        self.adjust_floor_secs = floor_secs;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        self.cycle.phase()
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.cycle.completed_focus_sessions()
    }

    pub fn durations(&self) -> &CycleDurations {
        &self.durations
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.cycle.phase(),
            running: self.running,
            remaining_secs: self.remaining_secs,
            completed_focus_sessions: self.cycle.completed_focus_sessions(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. No-op when already running or when
    /// the countdown sits at zero, which only completion handling resolves.
    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.remaining_secs == 0 {
            return None;
        }
        self.running = true;
        tracing::debug!(phase = self.cycle.phase().label(), "countdown started");
        Some(Event::TimerStarted {
            phase: self.cycle.phase(),
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop decrementing. Idempotent.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Apply a manual +/- adjustment to the remaining time.
    ///
    /// A decrease whose result would fall below the configured floor is
    /// rejected as a no-op (`None`), never clamped: manual adjustment must
    /// never land on zero and trigger completion.
    pub fn adjust_by(&mut self, delta_secs: i64) -> Option<Event> {
        let next = if delta_secs >= 0 {
            self.remaining_secs.saturating_add(delta_secs as u64)
        } else {
            match self.remaining_secs.checked_sub(delta_secs.unsigned_abs()) {
                Some(next) if next >= self.adjust_floor_secs => next,
                _ => return None,
            }
        };
        self.remaining_secs = next;
        Some(Event::TimerAdjusted {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and reload the *current* phase's nominal duration. Break-cycle
    /// progress is untouched.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.remaining_secs = self.durations.for_phase(self.cycle.phase());
        Some(Event::TimerReset {
            phase: self.cycle.phase(),
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and clear everything, break-cycle progress included. This is the
    /// explicit manual action; normal phase completion never does it.
    pub fn reset_cycle(&mut self) -> Option<Event> {
        self.cycle.reset();
        self.reset()
    }

    /// Advance the countdown by one elapsed second.
    ///
    /// Emission order within the tick: the decremented time, then either the
    /// near-completion cue (remaining in 1..=3) or, on reaching zero, the
    /// phase-completion notification -- never both. On completion the cycle
    /// advances exactly once, the next phase's duration is loaded, and the
    /// timer stops; the next phase starts paused. Ticks while not running
    /// are no-ops.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        if self.remaining_secs == 0 {
            // Unreachable through normal operation: completion stops the
            // countdown in the same tick that drains it.
            tracing::warn!("tick on a depleted countdown; stopping");
            self.running = false;
            return Vec::new();
        }

        self.remaining_secs -= 1;
        let at = Utc::now();
        let mut events = vec![Event::Tick {
            remaining_secs: self.remaining_secs,
            at,
        }];

        if self.remaining_secs == 0 {
            self.running = false;
            let transition = self.cycle.advance(&self.durations);
            self.remaining_secs = transition.duration_secs;
            tracing::debug!(
                next = transition.phase.label(),
                completed = transition.completed_focus_sessions,
                "phase completed"
            );
            events.push(Event::PhaseCompleted {
                now_is_break: transition.phase.is_break(),
                phase: transition.phase,
                completed_focus_sessions: transition.completed_focus_sessions,
                next_duration_secs: transition.duration_secs,
                at,
            });
        } else if self.remaining_secs <= NEAR_COMPLETION_WINDOW_SECS {
            events.push(Event::NearCompletion {
                remaining_secs: self.remaining_secs,
                at,
            });
        }

        events
    }
}
