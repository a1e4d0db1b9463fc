use thiserror::Error;

use crate::block::Pid;

const RQ_USAGE: &str = "RQ requires PID and size as 2nd and 3rd parameters, like 'RQ P1 20000'.";
const RL_USAGE: &str = "RL requires PID as 2nd parameter, like 'RL P1'.";

/// A line typed at the prompt, already split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `RQ <pid> <size>`
    Request { pid: Pid, size: usize },
    /// `RL <pid>`
    Release { pid: Pid },
    /// `STAT`
    Status,
    /// `C`
    Compact,
    /// `quit`
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command.")]
    Empty,

    #[error("Invalid command '{0}'. Available commands: RQ, RL, STAT, C, quit")]
    InvalidCommand(String),

    #[error("{0}")]
    InvalidRequest(&'static str),
}

impl Command {
    /// Parses a command line. The command word is case-insensitive and any
    /// argument past the ones a command needs is ignored.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(CommandError::Empty)?;

        match word.to_ascii_uppercase().as_str() {
            "RQ" => {
                let pid = words.next().and_then(parse_pid);
                let size = words.next().and_then(|s| s.parse::<usize>().ok());
                match (pid, size) {
                    (Some(pid), Some(size)) if size > 0 => Ok(Command::Request { pid, size }),
                    _ => Err(CommandError::InvalidRequest(RQ_USAGE)),
                }
            }
            "RL" => words
                .next()
                .and_then(parse_pid)
                .map(|pid| Command::Release { pid })
                .ok_or(CommandError::InvalidRequest(RL_USAGE)),
            "STAT" => Ok(Command::Status),
            "C" => Ok(Command::Compact),
            "QUIT" | "EXIT" => Ok(Command::Quit),
            _ => Err(CommandError::InvalidCommand(word.to_string())),
        }
    }
}

/// Accepts `P12`, `p12` or `12`.
fn parse_pid(word: &str) -> Option<Pid> {
    let digits = word.strip_prefix(['P', 'p']).unwrap_or(word);
    digits.parse().ok().map(Pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!(
            Command::parse("RQ P1 300"),
            Ok(Command::Request { pid: Pid(1), size: 300 })
        );
        assert_eq!(Command::parse("rl p7"), Ok(Command::Release { pid: Pid(7) }));
        assert_eq!(Command::parse("  Stat "), Ok(Command::Status));
        assert_eq!(Command::parse("c"), Ok(Command::Compact));
        assert_eq!(Command::parse("QUIT"), Ok(Command::Quit));
    }

    #[test]
    fn numeric_pid_and_extra_words() {
        assert_eq!(
            Command::parse("RQ 42 10 whatever"),
            Ok(Command::Request { pid: Pid(42), size: 10 })
        );
    }

    #[test]
    fn missing_parameters_are_invalid_requests() {
        for line in ["RQ", "RQ P1", "RQ P1 0", "RQ P1 -5", "RQ PX 10"] {
            assert_eq!(
                Command::parse(line),
                Err(CommandError::InvalidRequest(RQ_USAGE)),
                "{line}"
            );
        }
        assert_eq!(Command::parse("RL"), Err(CommandError::InvalidRequest(RL_USAGE)));
    }

    #[test]
    fn unknown_and_empty() {
        assert_eq!(
            Command::parse("ALLOC 1 2"),
            Err(CommandError::InvalidCommand("ALLOC".to_string()))
        );
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
    }
}
