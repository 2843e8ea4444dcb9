//! Parsing of the line commands typed into a running timer.

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Start,
    Pause,
    Stop,
    /// `None` toggles.
    Loop(Option<bool>),
    /// Raw text for the work minutes entry; validated by the session.
    Work(String),
    /// Raw text for the break minutes entry; validated by the session.
    Break(String),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  start | s            start or resume
  pause | p            pause
  stop  | x            stop and reset to work
  loop [on|off] | l    set or toggle auto-restart
  work <min> | w <min> set work minutes
  break <min> | b <min> set break minutes
  status               show the current state
  help | ?             this help
  quit | q             exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument '{extra}'"));
    }

    let command = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("start" | "s", None) => ShellCommand::Start,
        ("pause" | "p", None) => ShellCommand::Pause,
        ("stop" | "x", None) => ShellCommand::Stop,
        ("loop" | "l", None) => ShellCommand::Loop(None),
        ("loop" | "l", Some(state)) => match state.to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" => ShellCommand::Loop(Some(true)),
            "off" | "false" | "no" => ShellCommand::Loop(Some(false)),
            other => return Err(format!("expected 'on' or 'off', got '{other}'")),
        },
        ("work" | "w", Some(minutes)) => ShellCommand::Work(minutes.to_string()),
        ("break" | "b", Some(minutes)) => ShellCommand::Break(minutes.to_string()),
        ("work" | "w", None) => return Err("usage: work <minutes>".into()),
        ("break" | "b", None) => return Err("usage: break <minutes>".into()),
        ("status", None) => ShellCommand::Status,
        ("help" | "?", None) => ShellCommand::Help,
        ("quit" | "q" | "exit", None) => ShellCommand::Quit,
        (_, Some(extra)) if is_known(verb) => {
            return Err(format!("unexpected argument '{extra}'"))
        }
        _ => return Err(format!("unknown command '{verb}' (try 'help')")),
    };
    Ok(Some(command))
}

fn is_known(verb: &str) -> bool {
    matches!(
        verb.to_ascii_lowercase().as_str(),
        "start" | "s" | "pause" | "p" | "stop" | "x" | "status" | "help" | "?" | "quit" | "q"
            | "exit"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_and_aliases() {
        assert_eq!(parse_command("start"), Ok(Some(ShellCommand::Start)));
        assert_eq!(parse_command("  P "), Ok(Some(ShellCommand::Pause)));
        assert_eq!(parse_command("x"), Ok(Some(ShellCommand::Stop)));
        assert_eq!(parse_command("q"), Ok(Some(ShellCommand::Quit)));
        assert_eq!(parse_command("?"), Ok(Some(ShellCommand::Help)));
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   \t"), Ok(None));
    }

    #[test]
    fn loop_accepts_optional_state() {
        assert_eq!(parse_command("l"), Ok(Some(ShellCommand::Loop(None))));
        assert_eq!(parse_command("loop on"), Ok(Some(ShellCommand::Loop(Some(true)))));
        assert_eq!(parse_command("loop OFF"), Ok(Some(ShellCommand::Loop(Some(false)))));
        assert!(parse_command("loop maybe").is_err());
    }

    #[test]
    fn minutes_are_passed_through_unvalidated() {
        assert_eq!(
            parse_command("work abc"),
            Ok(Some(ShellCommand::Work("abc".into())))
        );
        assert_eq!(
            parse_command("b 10"),
            Ok(Some(ShellCommand::Break("10".into())))
        );
        assert!(parse_command("work").is_err());
    }

    #[test]
    fn rejects_unknown_and_extra_words() {
        assert!(parse_command("explode").is_err());
        assert!(parse_command("start now").is_err());
        assert!(parse_command("work 5 6").is_err());
    }
}
