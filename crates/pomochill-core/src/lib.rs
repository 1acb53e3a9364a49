//! # Pomochill Core Library
//!
//! Core business logic for the Pomochill focus timer: a Pomodoro-style
//! countdown with work/break cycling and an ambient-music companion.
//! The hosting shell (CLI, desktop, whatever) is a thin layer over this
//! crate and consumes it purely through commands and pushed events.
//!
//! ## Architecture
//!
//! - **Session timer**: a discrete one-second countdown state machine.
//!   Synchronous and caller-driven; every command returns the events it
//!   produced.
//! - **Break cycle**: the work / short-break / long-break policy, advanced
//!   only by natural countdown completion.
//! - **Tick driver**: [`TimerService`] wraps the timer in a single scoped
//!   1 s ticker task and fans events out on a broadcast channel.
//! - **Ambient player**: state of the background-stream widget (catalog,
//!   selection, volume); actual playback belongs to the shell.
//! - **Config**: TOML-based settings under `~/.config/pomochill/`.

pub mod config;
pub mod error;
pub mod events;
pub mod player;
pub mod quotes;
pub mod timer;

pub use config::Config;
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use player::AmbientPlayer;
pub use timer::{BreakCycle, CycleDurations, Phase, SessionTimer, TimerService};
