use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{debug, error};

use crate::{command::Command, manager::MemoryManager};

pub const PROMPT: &str = "allocator> ";

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one command line against `manager`, writing the reply to `out`.
///
/// User mistakes and recoverable allocator errors are printed and the
/// session goes on. Only a host allocation failure is returned as an error.
pub fn execute<W: Write>(manager: &mut MemoryManager, line: &str, out: &mut W) -> Result<Flow> {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(Flow::Continue);
        }
    };
    debug!("Executing {command:?}");

    let outcome = match command {
        Command::Quit => return Ok(Flow::Quit),
        Command::Status => {
            write!(out, "{}", manager.status())?;
            return Ok(Flow::Continue);
        }
        Command::Request { pid, size } => manager.request(pid, size).map(|a| {
            format!("Allocated [{} : {}] to {pid}", a.lower, a.upper)
        }),
        Command::Release { pid } => manager
            .release(pid)
            .map(|b| format!("Released [{} : {}] from {pid}", b.lower(), b.upper())),
        Command::Compact => manager.compact().map(|summary| match summary {
            Some(s) => format!("Compacted: {} units free in one block", s.free_capacity),
            None => "Nothing to compact".to_string(),
        }),
    };

    match outcome {
        Ok(reply) => writeln!(out, "{reply}")?,
        Err(e) if e.is_fatal() => {
            error!("{e}");
            return Err(e).context("Simulation cannot continue");
        }
        Err(e) => writeln!(out, "{e}")?,
    }

    Ok(Flow::Continue)
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Lines are read as raw bytes. Bytes that are not UTF-8 are replaced, so
/// such a line is reported as an invalid command instead of ending the
/// session. Only real read failures are returned.
pub fn run<R: BufRead, W: Write>(
    manager: &mut MemoryManager,
    mut input: R,
    mut out: W,
) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read command")?;
        if read == 0 {
            writeln!(out)?;
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        if execute(manager, &line, &mut out)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Pid;

    fn session(size: usize, script: &str) -> String {
        let mut manager = MemoryManager::new(size).unwrap();
        let mut out = Vec::new();
        run(&mut manager, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn errors_are_reported_and_loop_continues() {
        let out = session(100, "RL P1\nFOO\nRQ P1\nRQ P1 200\nRQ P1 50\nquit\nRQ P2 10\n");

        assert!(out.contains("There are currently no processes in memory."));
        assert!(out.contains("Invalid command 'FOO'"));
        assert!(out.contains("RQ requires PID and size"));
        assert!(out.contains("No available space for 200 units"));
        assert!(out.contains("Allocated [0 : 50] to P1"));
        assert!(!out.contains("P2"));
    }

    #[test]
    fn non_utf8_line_is_an_invalid_command() {
        let mut manager = MemoryManager::new(100).unwrap();
        let mut out = Vec::new();
        let script: &[u8] = b"RQ P1 10\n\xff\xfe\nRQ P2 20\nquit\n";

        run(&mut manager, script, &mut out).unwrap();

        let out = String::from_utf8_lossy(&out);
        assert!(out.contains("Invalid command"));
        assert!(out.contains("Allocated [10 : 30] to P2"));
        assert_eq!(manager.region().unwrap().find_owner(Pid(2)), Some(1));
    }

    #[test]
    fn end_of_input_quits() {
        let out = session(100, "RQ P1 10\n");

        assert_eq!(out, "allocator> Allocated [0 : 10] to P1\nallocator> \n");
    }

    #[test]
    fn stat_and_compact() {
        let out = session(100, "RQ P1 10\nRQ P2 20\nRL P1\nC\nSTAT\n");

        assert!(out.contains("Compacted: 80 units free in one block"));
        assert!(out.contains("Addresses [0 : 20] Process P2"));
        assert!(out.contains("Addresses [20 : END] FREE"));
    }
}
