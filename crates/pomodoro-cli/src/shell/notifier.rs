use notify_rust::Notification;
use pomodoro_core::notify::expiry_message;
use pomodoro_core::storage::NotificationsConfig;
use pomodoro_core::{ConsoleNotifier, Notifier, Phase, SilentNotifier};
use tokio::runtime::Handle;

type ShowFn = fn(Phase) -> Result<(), String>;

fn show_popup(expired: Phase) -> Result<(), String> {
    Notification::new()
        .summary("Pomodoro")
        .body(expiry_message(expired))
        .show()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Desktop popup, falling back to `F` when the popup fails.
///
/// `show()` talks to the notification daemon and can block, so inside a
/// tokio runtime it runs on the blocking pool.
pub struct DesktopNotifier<F = ConsoleNotifier> {
    fallback: F,
    show: ShowFn,
}

impl<F> DesktopNotifier<F> {
    pub fn new(fallback: F) -> Self {
        Self {
            fallback,
            show: show_popup,
        }
    }
}

impl<F> Notifier for DesktopNotifier<F>
where
    F: Notifier + Clone + Send + 'static,
{
    fn notify(&self, expired: Phase) {
        let show = self.show;
        let fallback = self.fallback.clone();
        let deliver = move || {
            if let Err(e) = show(expired) {
                tracing::warn!("desktop notification failed: {e}");
                fallback.notify(expired);
            }
        };
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(deliver);
            }
            Err(_) => deliver(),
        }
    }
}

/// Pick the notifier the configuration asks for.
pub fn from_config(cfg: &NotificationsConfig) -> Box<dyn Notifier> {
    if !cfg.enabled {
        return Box::new(SilentNotifier);
    }
    let console = ConsoleNotifier::new(cfg.bell);
    if cfg.desktop {
        Box::new(DesktopNotifier::new(console))
    } else {
        Box::new(console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Phase>>>);

    impl Recorder {
        fn seen(&self) -> Vec<Phase> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, expired: Phase) {
            self.0.lock().unwrap().push(expired);
        }
    }

    fn failing(recorder: &Recorder) -> DesktopNotifier<Recorder> {
        DesktopNotifier {
            fallback: recorder.clone(),
            show: |_| Err("no notification daemon".into()),
        }
    }

    #[test]
    fn test_fallback_runs_when_popup_fails() {
        let recorder = Recorder::default();
        failing(&recorder).notify(Phase::Break);
        assert_eq!(recorder.seen(), vec![Phase::Break]);
    }

    #[test]
    fn test_no_fallback_when_popup_shows() {
        let recorder = Recorder::default();
        let notifier = DesktopNotifier {
            fallback: recorder.clone(),
            show: |_| Ok(()),
        };
        notifier.notify(Phase::Work);
        assert!(recorder.seen().is_empty());
    }

    #[tokio::test]
    async fn test_popup_runs_off_the_event_loop() {
        let recorder = Recorder::default();
        failing(&recorder).notify(Phase::Work);

        for _ in 0..100 {
            if !recorder.seen().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(recorder.seen(), vec![Phase::Work]);
    }
}
