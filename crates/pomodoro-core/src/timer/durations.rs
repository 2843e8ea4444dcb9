//! Interval lengths and the text entries they are parsed from.

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::error::{DurationField, DurationProblem, InvalidDurationError};

pub const DEFAULT_WORK_MINUTES: u64 = 30;
pub const DEFAULT_BREAK_MINUTES: u64 = 5;
pub const DEFAULT_WORK_SECS: u64 = DEFAULT_WORK_MINUTES * 60;
pub const DEFAULT_BREAK_SECS: u64 = DEFAULT_BREAK_MINUTES * 60;

/// Parse a minutes entry into seconds.
///
/// Surrounding whitespace is ignored. Zero, negative, and non-integer
/// entries are rejected, as is anything whose second count overflows.
pub fn parse_minutes(field: DurationField, input: &str) -> Result<u64, InvalidDurationError> {
    let fail = |problem| InvalidDurationError {
        field,
        input: input.to_string(),
        problem,
    };

    let minutes: i64 = input.trim().parse().map_err(|e: std::num::ParseIntError| {
        match e.kind() {
            std::num::IntErrorKind::PosOverflow => fail(DurationProblem::TooLarge),
            std::num::IntErrorKind::NegOverflow => fail(DurationProblem::NotPositive),
            _ => fail(DurationProblem::NotANumber),
        }
    })?;
    if minutes < 1 {
        return Err(fail(DurationProblem::NotPositive));
    }
    (minutes as u64)
        .checked_mul(60)
        .ok_or_else(|| fail(DurationProblem::TooLarge))
}

/// Configured interval lengths in seconds. Both are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl Durations {
    /// Validate both entries, work first.
    pub fn parse(work: &str, brk: &str) -> Result<Self, InvalidDurationError> {
        Ok(Self {
            work_secs: parse_minutes(DurationField::Work, work)?,
            break_secs: parse_minutes(DurationField::Break, brk)?,
        })
    }

    pub fn for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::Break => self.break_secs,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_secs: DEFAULT_WORK_SECS,
            break_secs: DEFAULT_BREAK_SECS,
        }
    }
}

/// Raw text of the two minutes entries, as last edited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationInputs {
    pub work_minutes: String,
    pub break_minutes: String,
}

impl DurationInputs {
    pub fn new(work_minutes: impl Into<String>, break_minutes: impl Into<String>) -> Self {
        Self {
            work_minutes: work_minutes.into(),
            break_minutes: break_minutes.into(),
        }
    }
}

impl Default for DurationInputs {
    fn default() -> Self {
        Self::new(
            DEFAULT_WORK_MINUTES.to_string(),
            DEFAULT_BREAK_MINUTES.to_string(),
        )
    }
}
