//! External filter commands for visual-line `f`.
//!
//! The editor hands a command and the selected text to a [`Filter`] and
//! gets the replacement text back. The call blocks until the command has
//! finished; there is no cancellation.

use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::time::Instant;

/// Something that can turn a command plus input bytes into output bytes.
pub trait Filter {
    /// Run `command` with `input` on its stdin and return its stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or its pipes fail.
    /// The command's exit status is not inspected.
    fn run(&mut self, command: &str, input: &[u8]) -> io::Result<Vec<u8>>;
}

/// Runs filter commands through `/bin/sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellFilter;

impl Filter for ShellFilter {
    fn run(&mut self, command: &str, input: &[u8]) -> io::Result<Vec<u8>> {
        let started = Instant::now();
        let mut child = Command::new("/bin/sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("filter stdin unavailable"))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("filter stdout unavailable"))?;

        // stdin is fed from its own thread while stdout drains here.
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || {
                let result = stdin.write_all(input);
                drop(stdin);
                result
            });
            let mut output = Vec::new();
            let read = stdout.read_to_end(&mut output);
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("filter writer panicked")));
            read?;
            match written {
                Err(err) if err.kind() != io::ErrorKind::BrokenPipe => Err(err),
                _ => Ok(output),
            }
        })?;

        let status = child.wait()?;
        tracing::info!(
            command,
            input_bytes = input.len(),
            output_bytes = output.len(),
            ?status,
            elapsed = ?started.elapsed(),
            "filter finished"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_shell_filter_pipes_through_command() {
        let out = ShellFilter.run("sort", b"b\na\nc\n").unwrap();
        assert_eq!(out, b"a\nb\nc\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_filter_ignores_exit_status() {
        let out = ShellFilter.run("printf done; exit 3", b"").unwrap();
        assert_eq!(out, b"done");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_that_ignores_input_still_completes() {
        let input = vec![b'x'; 256 * 1024];
        let out = ShellFilter.run("echo hi", &input).unwrap();
        assert_eq!(out, b"hi\n");
    }
}
