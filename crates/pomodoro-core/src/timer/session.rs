//! Timer session implementation.
//!
//! The session is a tick-driven state machine. It does not use internal
//! threads or clocks - it asks its [`TickScheduler`] for the next tick and
//! counts down one second each time the host delivers it.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped --start--> Running --pause--> Paused --start--> Running
//!    ^                  |  \                |
//!    |                  |   tick (expiry, loop on) -> Running in next phase
//!    +------stop--------+---------stop------+
//!    +--tick (expiry, loop off)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = TimerSession::new(ManualScheduler::new(), SilentNotifier);
//! session.start()?;
//! // Whenever the scheduler delivers a token:
//! let events = session.tick(token);
//! ```

use chrono::Utc;
use tracing::{debug, info, trace, warn};

use super::durations::{
    parse_minutes, DurationInputs, Durations, DEFAULT_WORK_SECS,
};
use super::phase::{Phase, TimerStatus};
use super::scheduler::{ManualScheduler, TickScheduler, TickToken};
use super::view::{format_countdown, phase_label, SessionView};
use crate::error::{DurationField, InvalidDurationError};
use crate::events::Event;
use crate::notify::Notifier;

/// One work/break timer.
///
/// Mutated only through `configure`, `start`, `pause`, `stop`, `tick` and
/// the input/loop setters. At most one tick is pending at any time, and
/// only while the session is running.
#[derive(Debug)]
pub struct TimerSession<S, N> {
    phase: Phase,
    status: TimerStatus,
    remaining_secs: u64,
    durations: Durations,
    inputs: DurationInputs,
    loop_enabled: bool,
    /// Whether the current phase has begun counting. Cleared by stop.
    phase_started: bool,
    pending: Option<TickToken>,
    last_token: u64,
    scheduler: S,
    notifier: N,
}

impl<S: TickScheduler, N: Notifier> TimerSession<S, N> {
    /// A stopped session in the work phase with default durations
    /// (30 min work, 5 min break) and looping enabled.
    pub fn new(scheduler: S, notifier: N) -> Self {
        let durations = Durations::default();
        Self {
            phase: Phase::Work,
            status: TimerStatus::Stopped,
            remaining_secs: durations.work_secs,
            durations,
            inputs: DurationInputs::default(),
            loop_enabled: true,
            phase_started: false,
            pending: None,
            last_token: 0,
            scheduler,
            notifier,
        }
    }

    /// A stopped session seeded from the given entries.
    pub fn with_inputs(
        inputs: DurationInputs,
        loop_enabled: bool,
        scheduler: S,
        notifier: N,
    ) -> Result<Self, InvalidDurationError> {
        let mut session = Self::new(scheduler, notifier);
        session.configure(&inputs.work_minutes, &inputs.break_minutes)?;
        session.loop_enabled = loop_enabled;
        Ok(session)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn inputs(&self) -> &DurationInputs {
        &self.inputs
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// The token of the one outstanding tick, if any.
    pub fn pending_tick(&self) -> Option<TickToken> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            status: self.status,
            phase_label: phase_label(self.phase, self.status),
            countdown: format_countdown(self.remaining_secs),
            remaining_secs: self.remaining_secs,
            loop_enabled: self.loop_enabled,
            work_input: self.inputs.work_minutes.clone(),
            break_input: self.inputs.break_minutes.clone(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            view: self.view(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Validate and apply both minutes entries.
    ///
    /// On failure nothing changes. On success the entries become the
    /// current inputs; a stopped session also shows the new duration.
    pub fn configure(&mut self, work: &str, brk: &str) -> Result<Event, InvalidDurationError> {
        let durations = Durations::parse(work, brk)?;
        self.durations = durations;
        self.inputs = DurationInputs::new(work, brk);
        if self.status == TimerStatus::Stopped {
            self.remaining_secs = durations.for_phase(self.phase);
        }
        debug!(
            work_secs = durations.work_secs,
            break_secs = durations.break_secs,
            "durations configured"
        );
        Ok(Event::DurationsConfigured {
            work_secs: durations.work_secs,
            break_secs: durations.break_secs,
            at: Utc::now(),
        })
    }

    /// Record the work entry text. Validated on the next start or stop.
    pub fn set_work_input(&mut self, text: &str) {
        self.inputs.work_minutes = text.to_string();
    }

    /// Record the break entry text. Validated on the next start.
    pub fn set_break_input(&mut self, text: &str) {
        self.inputs.break_minutes = text.to_string();
    }

    /// Only consulted when a phase expires.
    pub fn set_loop_enabled(&mut self, enabled: bool) -> Event {
        self.loop_enabled = enabled;
        debug!(enabled, "loop toggled");
        Event::LoopToggled { enabled }
    }

    pub fn toggle_loop(&mut self) -> Event {
        self.set_loop_enabled(!self.loop_enabled)
    }

    /// Start a fresh phase or resume a paused one.
    ///
    /// Re-validates the current entries first; if they are invalid the
    /// error is returned and the session is left exactly as it was.
    /// Returns `Ok(None)` when already running.
    pub fn start(&mut self) -> Result<Option<Event>, InvalidDurationError> {
        if self.status == TimerStatus::Running {
            return Ok(None);
        }

        let inputs = self.inputs.clone();
        self.configure(&inputs.work_minutes, &inputs.break_minutes)?;

        let resuming = self.phase_started;
        if !resuming {
            self.remaining_secs = self.durations.for_phase(self.phase);
            self.phase_started = true;
        }
        self.status = TimerStatus::Running;
        self.schedule_next();

        let phase = self.phase;
        let remaining_secs = self.remaining_secs;
        let at = Utc::now();
        if resuming {
            debug!(?phase, remaining_secs, "timer resumed");
            Ok(Some(Event::TimerResumed {
                phase,
                remaining_secs,
                at,
            }))
        } else {
            debug!(?phase, remaining_secs, "timer started");
            Ok(Some(Event::TimerStarted {
                phase,
                remaining_secs,
                at,
            }))
        }
    }

    /// Freeze the countdown. Returns `None` unless running.
    pub fn pause(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.cancel_pending();
        self.status = TimerStatus::Paused;
        debug!(remaining_secs = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Hard reset to a stopped work phase. Never fails: an invalid work
    /// entry falls back to the default work duration.
    pub fn stop(&mut self) -> Event {
        self.cancel_pending();
        self.status = TimerStatus::Stopped;
        self.phase = Phase::Work;
        self.phase_started = false;

        let work_secs = match parse_minutes(DurationField::Work, &self.inputs.work_minutes) {
            Ok(secs) => secs,
            Err(e) => {
                warn!("{e}; using default of {DEFAULT_WORK_SECS}s");
                DEFAULT_WORK_SECS
            }
        };
        self.durations.work_secs = work_secs;
        self.remaining_secs = work_secs;

        debug!(remaining_secs = work_secs, "timer stopped");
        Event::TimerStopped {
            remaining_secs: work_secs,
            at: Utc::now(),
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Only the pending token counts; anything else was cancelled or
    /// superseded and is ignored without touching state.
    pub fn tick(&mut self, token: TickToken) -> Vec<Event> {
        if self.status != TimerStatus::Running || self.pending != Some(token) {
            trace!(?token, pending = ?self.pending, "ignoring stale tick");
            return Vec::new();
        }
        self.pending = None;

        let mut events = Vec::new();
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            events.push(Event::Ticked {
                phase: self.phase,
                remaining_secs: self.remaining_secs,
            });
        }

        if self.remaining_secs == 0 {
            self.expire(&mut events);
        } else {
            self.schedule_next();
        }
        events
    }

    /// Cancel the outstanding tick before the host goes away.
    pub fn shutdown(&mut self) {
        self.cancel_pending();
        debug!("session shut down");
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expire(&mut self, events: &mut Vec<Event>) {
        let expired = self.phase;
        info!("{} phase expired", expired.label());
        self.notifier.notify(expired);
        events.push(Event::PhaseExpired {
            phase: expired,
            at: Utc::now(),
        });
        self.switch_mode(events);
    }

    fn switch_mode(&mut self, events: &mut Vec<Event>) {
        let from = self.phase;
        if self.loop_enabled {
            let to = from.next();
            self.phase = to;
            self.remaining_secs = self.durations.for_phase(to);
            self.phase_started = true;
            self.schedule_next();
            debug!(?from, ?to, remaining_secs = self.remaining_secs, "phase switched");
            events.push(Event::PhaseSwitched {
                from,
                to,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        } else {
            events.push(self.stop());
            info!("cycle complete");
            events.push(Event::CycleCompleted { at: Utc::now() });
        }
    }

    fn schedule_next(&mut self) {
        self.cancel_pending();
        self.last_token += 1;
        let token = TickToken(self.last_token);
        self.pending = Some(token);
        self.scheduler.schedule(token);
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}

impl<N: Notifier> TimerSession<ManualScheduler, N> {
    /// Deliver the oldest tick the manual scheduler is holding, as if its
    /// period had elapsed. Returns no events when nothing is scheduled.
    pub fn advance(&mut self) -> Vec<Event> {
        match self.scheduler.take_due() {
            Some(token) => self.tick(token),
            None => Vec::new(),
        }
    }
}
