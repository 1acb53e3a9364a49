mod cycle;
mod driver;
mod session;

pub use cycle::{advance, BreakCycle, CycleDurations, Phase, Transition};
pub use driver::TimerService;
pub use session::{SessionTimer, DEFAULT_ADJUST_FLOOR_SECS, NEAR_COMPLETION_WINDOW_SECS};
