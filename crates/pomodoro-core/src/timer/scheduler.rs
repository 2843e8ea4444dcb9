//! The seam between the session and whatever delivers ticks.
//!
//! The session never sleeps or spawns. It asks a [`TickScheduler`] to deliver
//! a [`TickToken`] one tick period from now, and cancels that token when it
//! pauses or stops. The host hands delivered tokens back to
//! [`TimerSession::tick`](super::TimerSession::tick).

use serde::{Deserialize, Serialize};

/// Identifies one scheduled tick. Tokens are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickToken(pub u64);

/// Delivers tick tokens back to the host one period after scheduling.
pub trait TickScheduler {
    /// Arrange for `token` to be delivered one tick period from now.
    fn schedule(&mut self, token: TickToken);

    /// Drop a scheduled token so it is never delivered. Cancelling a token
    /// that already fired, or was never scheduled, is a no-op.
    fn cancel(&mut self, token: TickToken);
}

/// A scheduler that only records what was asked of it.
///
/// For hosts that drive the countdown themselves, and for tests.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    scheduled: Vec<TickToken>,
    cancelled: Vec<TickToken>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens scheduled and not yet cancelled or taken.
    pub fn pending(&self) -> &[TickToken] {
        &self.scheduled
    }

    pub fn cancelled(&self) -> &[TickToken] {
        &self.cancelled
    }

    /// Pop the oldest pending token, as if its period elapsed.
    pub fn take_due(&mut self) -> Option<TickToken> {
        if self.scheduled.is_empty() {
            None
        } else {
            Some(self.scheduled.remove(0))
        }
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, token: TickToken) {
        self.scheduled.push(token);
    }

    fn cancel(&mut self, token: TickToken) {
        if let Some(pos) = self.scheduled.iter().position(|t| *t == token) {
            self.scheduled.remove(pos);
            self.cancelled.push(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_removes_pending() {
        let mut s = ManualScheduler::new();
        s.schedule(TickToken(1));
        s.schedule(TickToken(2));
        s.cancel(TickToken(1));
        assert_eq!(s.pending(), &[TickToken(2)]);
        assert_eq!(s.cancelled(), &[TickToken(1)]);
    }

    #[test]
    fn cancel_unknown_is_noop() {
        let mut s = ManualScheduler::new();
        s.cancel(TickToken(7));
        assert!(s.cancelled().is_empty());
    }

    #[test]
    fn take_due_is_fifo() {
        let mut s = ManualScheduler::new();
        s.schedule(TickToken(3));
        s.schedule(TickToken(4));
        assert_eq!(s.take_due(), Some(TickToken(3)));
        assert_eq!(s.take_due(), Some(TickToken(4)));
        assert_eq!(s.take_due(), None);
    }
}
