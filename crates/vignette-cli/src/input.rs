//! Terminal input vocabulary.

use vignette_core::signal::Signal;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward a signal to the Director.
    Signal(Signal),
    /// Stop playing.
    Quit,
}

/// Parses one line of terminal input. Returns `None` for unrecognised input.
#[must_use]
pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "c" | "continue" => Some(Command::Signal(Signal::Continue)),
        "s" | "skip" => Some(Command::Signal(Signal::Skip)),
        "p" | "phase" => Some(Command::Signal(Signal::PhaseTrigger)),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_continues() {
        assert_eq!(parse_command(""), Some(Command::Signal(Signal::Continue)));
        assert_eq!(parse_command("  \r"), Some(Command::Signal(Signal::Continue)));
    }

    #[test]
    fn test_single_letter_commands() {
        assert_eq!(parse_command("c"), Some(Command::Signal(Signal::Continue)));
        assert_eq!(parse_command("S"), Some(Command::Signal(Signal::Skip)));
        assert_eq!(parse_command("p"), Some(Command::Signal(Signal::PhaseTrigger)));
        assert_eq!(parse_command("q"), Some(Command::Quit));
    }

    #[test]
    fn test_unknown_input_is_rejected() {
        assert_eq!(parse_command("jump"), None);
    }
}
