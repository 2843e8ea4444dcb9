use std::ops::ControlFlow;
use std::time::Duration;

use clap::Args;
use pomodoro_core::error::Result;
use pomodoro_core::{
    Config, DurationInputs, Event, Notifier, SilentNotifier, TickScheduler, TimerSession,
    TimerStatus,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::shell::{notifier, parse_command, Renderer, ShellCommand, TokioTickScheduler};

#[derive(Args)]
pub struct RunArgs {
    /// Work minutes (defaults to timer.work_minutes from config)
    #[arg(short, long)]
    work: Option<String>,
    /// Break minutes (defaults to timer.break_minutes from config)
    #[arg(short = 'b', long = "break")]
    break_minutes: Option<String>,
    /// Stop after the work interval instead of cycling
    #[arg(long)]
    no_loop: bool,
    /// Disable expiry notifications
    #[arg(long)]
    no_sound: bool,
    /// Print events as JSON lines instead of a status line
    #[arg(long)]
    json: bool,
    /// Milliseconds per countdown second
    #[arg(long, default_value_t = 1000, hide = true, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = Config::load()?;

    let defaults = config.duration_inputs();
    let inputs = DurationInputs::new(
        args.work.unwrap_or(defaults.work_minutes),
        args.break_minutes.unwrap_or(defaults.break_minutes),
    );
    let loop_enabled = config.timer.auto_restart && !args.no_loop;
    let notifier: Box<dyn Notifier> = if args.no_sound {
        Box::new(SilentNotifier)
    } else {
        notifier::from_config(&config.notifications)
    };
    let renderer = Renderer::new(args.json);
    let period = Duration::from_millis(args.tick_ms);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(event_loop(inputs, loop_enabled, notifier, period, renderer));
    // A stdin read may still be parked on the blocking pool.
    runtime.shutdown_background();
    result
}

async fn event_loop(
    inputs: DurationInputs,
    loop_enabled: bool,
    notifier: Box<dyn Notifier>,
    period: Duration,
    mut renderer: Renderer,
) -> Result<()> {
    let (scheduler, mut ticks) = TokioTickScheduler::new(period);
    let mut session = TimerSession::with_inputs(inputs, loop_enabled, scheduler, notifier)?;
    renderer.snapshot(&session.snapshot(), &session.view());

    // Raw segments: bytes that are not UTF-8 must not end the session.
    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_segment(), if input_open => match line {
                Ok(Some(bytes)) => {
                    let line = String::from_utf8_lossy(&bytes);
                    match parse_command(line.trim_end_matches('\r')) {
                        Ok(Some(command)) => {
                            if apply(&mut session, command, &mut renderer).is_break() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(message) => renderer.error(&message),
                    }
                }
                Ok(None) => {
                    debug!("input closed");
                    input_open = false;
                }
                Err(e) => {
                    warn!("reading input failed: {e}");
                    renderer.error(&format!("input closed: {e}"));
                    input_open = false;
                }
            },
            Some(token) = ticks.recv() => {
                let events = session.tick(token);
                renderer.show(&events, &session.view());
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                break;
            }
        }

        // Without input nothing can restart a stopped or paused timer.
        if !input_open && session.status() != TimerStatus::Running {
            break;
        }
    }

    session.shutdown();
    renderer.finish();
    Ok(())
}

fn apply<S: TickScheduler, N: Notifier>(
    session: &mut TimerSession<S, N>,
    command: ShellCommand,
    renderer: &mut Renderer,
) -> ControlFlow<()> {
    let events: Vec<Event> = match command {
        ShellCommand::Start => match session.start() {
            Ok(event) => event.into_iter().collect(),
            Err(e) => {
                renderer.error(&e.to_string());
                return ControlFlow::Continue(());
            }
        },
        ShellCommand::Pause => session.pause().into_iter().collect(),
        ShellCommand::Stop => vec![session.stop()],
        ShellCommand::Loop(None) => vec![session.toggle_loop()],
        ShellCommand::Loop(Some(enabled)) => vec![session.set_loop_enabled(enabled)],
        ShellCommand::Work(text) => {
            session.set_work_input(&text);
            Vec::new()
        }
        ShellCommand::Break(text) => {
            session.set_break_input(&text);
            Vec::new()
        }
        ShellCommand::Status => {
            renderer.snapshot(&session.snapshot(), &session.view());
            return ControlFlow::Continue(());
        }
        ShellCommand::Help => {
            renderer.help();
            return ControlFlow::Continue(());
        }
        ShellCommand::Quit => return ControlFlow::Break(()),
    };
    renderer.show(&events, &session.view());
    ControlFlow::Continue(())
}
