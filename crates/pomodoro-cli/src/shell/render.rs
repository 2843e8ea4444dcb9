//! Terminal output for a running session.
//!
//! Human mode keeps one status line, redrawn in place on a terminal and
//! printed line by line otherwise. JSON mode prints one event per line.

use std::io::{IsTerminal, Write};

use pomodoro_core::{Event, SessionView};

use super::input::HELP;

pub struct Renderer {
    json: bool,
    tty: bool,
    /// A status line is drawn without a trailing newline.
    line_open: bool,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            tty: std::io::stdout().is_terminal(),
            line_open: false,
        }
    }

    /// Report what happened, then redraw from the current view.
    pub fn show(&mut self, events: &[Event], view: &SessionView) {
        if self.json {
            events.iter().for_each(emit_json);
            return;
        }
        for event in events {
            if let Some(notice) = notice_for(event) {
                self.notice(&notice);
            }
        }
        self.status_line(view);
    }

    /// Full state, on request.
    pub fn snapshot(&mut self, snapshot: &Event, view: &SessionView) {
        if self.json {
            emit_json(snapshot);
            return;
        }
        self.notice(&format!(
            "{} {} | status: {:?} | loop: {} | work: {} min | break: {} min",
            view.phase_label,
            view.countdown,
            view.status,
            on_off(view.loop_enabled),
            view.work_input,
            view.break_input,
        ));
        self.status_line(view);
    }

    pub fn error(&mut self, message: &str) {
        self.close_line();
        eprintln!("error: {message}");
    }

    pub fn help(&mut self) {
        self.close_line();
        println!("{HELP}");
    }

    pub fn finish(&mut self) {
        self.close_line();
    }

    fn notice(&mut self, text: &str) {
        self.close_line();
        println!("{text}");
    }

    fn status_line(&mut self, view: &SessionView) {
        let line = status_text(view);
        if self.tty {
            print!("\r\x1b[2K{line}");
            let _ = std::io::stdout().flush();
            self.line_open = true;
        } else {
            println!("{line}");
        }
    }

    fn close_line(&mut self) {
        if self.line_open {
            println!();
            self.line_open = false;
        }
    }
}

fn emit_json(event: &Event) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::error!("failed to encode {} event: {e}", event.kind()),
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn status_text(view: &SessionView) -> String {
    format!(
        "{}  {:<14} [loop {}]",
        view.countdown,
        view.phase_label,
        on_off(view.loop_enabled)
    )
}

fn notice_for(event: &Event) -> Option<String> {
    match event {
        Event::PhaseSwitched { to, .. } => Some(format!("{} time!", to.label())),
        Event::CycleCompleted { .. } => Some("Pomodoro cycle complete!".to_string()),
        _ => None,
    }
}
