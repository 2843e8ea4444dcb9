//! Expiry notifications.
//!
//! The session calls a [`Notifier`] once per expiry. Notifiers are
//! best-effort: they must not block and have no way to fail the transition.

use std::io::{IsTerminal, Write};

use crate::timer::Phase;

/// Told when a phase runs out.
pub trait Notifier {
    fn notify(&self, expired: Phase);
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, expired: Phase) {
        (**self).notify(expired)
    }
}

/// Message shown when `expired` finishes.
pub fn expiry_message(expired: Phase) -> &'static str {
    match expired {
        Phase::Work => "Work session complete! Time for a break.",
        Phase::Break => "Break is over! Back to work.",
    }
}

/// Rings the terminal bell, or prints a notice when there is no terminal.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    bell: bool,
}

impl ConsoleNotifier {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }

    fn ring(&self) -> std::io::Result<()> {
        let mut err = std::io::stderr().lock();
        err.write_all(b"\x07")?;
        err.flush()
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, expired: Phase) {
        if self.bell && std::io::stderr().is_terminal() {
            match self.ring() {
                Ok(()) => return,
                Err(e) => tracing::warn!("terminal bell failed: {e}"),
            }
        }
        eprintln!("Time's up! {}", expiry_message(expired));
    }
}

/// Does nothing. Used when notifications are turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, expired: Phase) {
        tracing::debug!(?expired, "notification suppressed");
    }
}
