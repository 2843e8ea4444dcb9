//! Display state derived from a session.
//!
//! Nothing here is stored; shells rebuild the view after every mutation.

use serde::{Deserialize, Serialize};

use super::phase::{Phase, TimerStatus};

/// Format seconds as `MM:SS`. Minutes are not capped at 59.
pub fn format_countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `"Work"` / `"Break"`, with `" (Paused)"` appended while paused.
pub fn phase_label(phase: Phase, status: TimerStatus) -> String {
    match status {
        TimerStatus::Paused => format!("{} (Paused)", phase.label()),
        TimerStatus::Running | TimerStatus::Stopped => phase.label().to_string(),
    }
}

/// Everything a shell needs to draw the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: Phase,
    pub status: TimerStatus,
    pub phase_label: String,
    pub countdown: String,
    pub remaining_secs: u64,
    pub loop_enabled: bool,
    pub work_input: String,
    pub break_input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_countdown() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(65), "01:05");
        assert_eq!(format_countdown(1800), "30:00");
        assert_eq!(format_countdown(3661), "61:01");
    }

    #[test]
    fn paused_label_is_not_cumulative() {
        let once = phase_label(Phase::Break, TimerStatus::Paused);
        let again = phase_label(Phase::Break, TimerStatus::Paused);
        assert_eq!(once, "Break (Paused)");
        assert_eq!(once, again);
        assert_eq!(phase_label(Phase::Work, TimerStatus::Running), "Work");
        assert_eq!(phase_label(Phase::Work, TimerStatus::Stopped), "Work");
    }
}
