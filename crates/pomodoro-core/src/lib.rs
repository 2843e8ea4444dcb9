//! # Pomodoro Core Library
//!
//! This library provides the core logic for a work/break countdown timer.
//! Shells (the `pomodoro` CLI, or anything else that can deliver ticks) are
//! thin layers that forward user commands and render [`SessionView`]s.
//!
//! ## Architecture
//!
//! - **Timer Session**: A tick-driven state machine. The caller supplies a
//!   [`TickScheduler`] and hands each delivered [`TickToken`] back to
//!   [`TimerSession::tick`]
//! - **Notifier**: Best-effort expiry alert behind the [`Notifier`] trait
//! - **Storage**: TOML-based configuration of defaults and notifications
//!
//! ## Key Components
//!
//! - [`TimerSession`]: Core timer state machine
//! - [`Event`]: What every state change reports
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DurationField, DurationProblem, InvalidDurationError};
pub use events::Event;
pub use notify::{ConsoleNotifier, Notifier, SilentNotifier};
pub use storage::Config;
pub use timer::{
    format_countdown, DurationInputs, Durations, ManualScheduler, Phase, SessionView,
    TickScheduler, TickToken, TimerSession, TimerStatus,
};
