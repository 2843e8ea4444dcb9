//! Tick delivery on a tokio runtime.

use std::collections::HashMap;
use std::time::Duration;

use pomodoro_core::{TickScheduler, TickToken};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawns one sleep per scheduled token and sends the token on expiry.
///
/// Must be used from inside a tokio runtime.
pub struct TokioTickScheduler {
    period: Duration,
    tx: mpsc::UnboundedSender<TickToken>,
    sleeps: HashMap<TickToken, JoinHandle<()>>,
}

impl TokioTickScheduler {
    /// The receiver yields tokens as their period elapses.
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<TickToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            period,
            tx,
            sleeps: HashMap::new(),
        };
        (scheduler, rx)
    }
}

impl TickScheduler for TokioTickScheduler {
    fn schedule(&mut self, token: TickToken) {
        self.sleeps.retain(|_, handle| !handle.is_finished());

        let tx = self.tx.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(period).await;
            // Receiver gone means the shell is shutting down.
            let _ = tx.send(token);
        });
        self.sleeps.insert(token, handle);
    }

    fn cancel(&mut self, token: TickToken) {
        if let Some(handle) = self.sleeps.remove(&token) {
            handle.abort();
        }
    }
}

impl Drop for TokioTickScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.sleeps.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_scheduled_token() {
        let (mut scheduler, mut rx) = TokioTickScheduler::new(Duration::from_millis(1));
        scheduler.schedule(TickToken(1));
        assert_eq!(rx.recv().await, Some(TickToken(1)));
    }

    #[tokio::test]
    async fn cancelled_token_never_arrives() {
        let (mut scheduler, mut rx) = TokioTickScheduler::new(Duration::from_millis(20));
        scheduler.schedule(TickToken(1));
        scheduler.cancel(TickToken(1));
        scheduler.schedule(TickToken(2));
        assert_eq!(rx.recv().await, Some(TickToken(2)));
        assert!(rx.try_recv().is_err());
    }
}
