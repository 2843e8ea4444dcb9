use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, SessionView};

/// Every state change in a session produces an Event.
/// Shells render from them or print them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    DurationsConfigured {
        work_secs: u64,
        break_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Ticked {
        phase: Phase,
        remaining_secs: u64,
    },
    PhaseExpired {
        phase: Phase,
        at: DateTime<Utc>,
    },
    PhaseSwitched {
        from: Phase,
        to: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A non-looping session finished its interval and reset itself.
    CycleCompleted {
        at: DateTime<Utc>,
    },
    LoopToggled {
        enabled: bool,
    },
    StateSnapshot {
        #[serde(flatten)]
        view: SessionView,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short snake_case name, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::DurationsConfigured { .. } => "durations_configured",
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerResumed { .. } => "timer_resumed",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerStopped { .. } => "timer_stopped",
            Event::Ticked { .. } => "ticked",
            Event::PhaseExpired { .. } => "phase_expired",
            Event::PhaseSwitched { .. } => "phase_switched",
            Event::CycleCompleted { .. } => "cycle_completed",
            Event::LoopToggled { .. } => "loop_toggled",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}
