mod durations;
mod phase;
mod scheduler;
mod session;
mod view;

pub use durations::{
    parse_minutes, DurationInputs, Durations, DEFAULT_BREAK_MINUTES, DEFAULT_BREAK_SECS,
    DEFAULT_WORK_MINUTES, DEFAULT_WORK_SECS,
};
pub use phase::{Phase, TimerStatus};
pub use scheduler::{ManualScheduler, TickScheduler, TickToken};
pub use session::TimerSession;
pub use view::{format_countdown, phase_label, SessionView};
