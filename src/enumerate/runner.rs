//! runner.rs - Runs the font listing command with bounded output and time.
//!
//! The child's stdout and stderr are drained on helper threads that report
//! back over a channel, so the caller can give up after a deadline instead
//! of blocking forever on a hung font utility.

use crate::error::EnumerationError;
use log::{debug, info, warn};
use std::fmt;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on buffered stdout.
pub const DEFAULT_OUTPUT_LIMIT: usize = 1024 * 1024;

/// How long the font utility gets before it is killed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Only the head of stderr is kept for error messages.
const STDERR_LIMIT: usize = 64 * 1024;

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Executes a command and returns its stdout.
///
/// Implementations must fail on a non-zero exit status.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<String, EnumerationError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
    output_limit: usize,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_OUTPUT_LIMIT)
    }
}

enum PipeOutput {
    Stdout(std::io::Result<Vec<u8>>),
    Stderr(std::io::Result<Vec<u8>>),
}

impl SystemRunner {
    pub fn new(timeout: Duration, output_limit: usize) -> Self {
        Self {
            timeout,
            output_limit,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn output_limit(&self) -> usize {
        self.output_limit
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<String, EnumerationError> {
        let command = spec.to_string();
        info!("Running font listing command: {}", command);

        let io_err = |source: std::io::Error| EnumerationError::Io {
            command: command.clone(),
            source,
        };

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // PGID = child PID, so the whole pipeline can be killed at once
            cmd.process_group(0);
        }
        let mut child = cmd.spawn().map_err(io_err)?;

        let deadline = Instant::now() + self.timeout;
        let (tx, rx) = mpsc::channel();
        let mut pending = 0;

        if let Some(stdout) = child.stdout.take() {
            let tx = tx.clone();
            let limit = self.output_limit;
            thread::spawn(move || {
                let _ = tx.send(PipeOutput::Stdout(read_capped(stdout, limit + 1)));
            });
            pending += 1;
        }
        if let Some(mut stderr) = child.stderr.take() {
            let tx = tx.clone();
            thread::spawn(move || {
                let head = read_capped(&mut stderr, STDERR_LIMIT);
                // Keep draining so a chatty child never blocks on a full pipe
                let _ = std::io::copy(&mut stderr, &mut std::io::sink());
                let _ = tx.send(PipeOutput::Stderr(head));
            });
            pending += 1;
        }
        drop(tx);

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        while pending > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(PipeOutput::Stdout(result)) => {
                    pending -= 1;
                    stdout = match result {
                        Ok(bytes) => bytes,
                        Err(e) => {
                            kill(&mut child);
                            return Err(io_err(e));
                        }
                    };
                    if stdout.len() > self.output_limit {
                        warn!("{} exceeded the {} byte output cap", command, self.output_limit);
                        kill(&mut child);
                        return Err(EnumerationError::OutputTooLarge {
                            command: command.clone(),
                            limit: self.output_limit,
                        });
                    }
                }
                Ok(PipeOutput::Stderr(result)) => {
                    pending -= 1;
                    // A failed stderr read only costs us the error text.
                    stderr = result.unwrap_or_default();
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!("{} timed out after {:?}", command, self.timeout);
                    kill(&mut child);
                    return Err(EnumerationError::Timeout {
                        command: command.clone(),
                        timeout: self.timeout,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    kill(&mut child);
                    return Err(EnumerationError::Timeout {
                        command: command.clone(),
                        timeout: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(Duration::from_millis(10)),
                Err(e) => return Err(io_err(e)),
            }
        };

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(EnumerationError::ExitStatus {
                command: command.clone(),
                code,
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        debug!("{} produced {} bytes", command, stdout.len());
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

fn read_capped(reader: impl Read, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Kill the child and, on unix, every process in its group (`sh -c` pipelines).
fn kill(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;
        // Negative PID targets the process group
        if let Err(e) = signal::kill(Pid::from_raw(-(child.id() as i32)), Signal::SIGKILL) {
            debug!("Failed to kill process group {}: {}", child.id(), e);
        }
    }
    if let Err(e) = child.kill() {
        debug!("Failed to kill child {}: {}", child.id(), e);
    }
    let _ = child.wait();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh", ["-c", script])
    }

    #[test]
    fn test_display_quotes_args_with_spaces() {
        let spec = CommandSpec::new("reg", ["query", "HKLM\\Windows NT\\Fonts"]);
        assert_eq!(spec.to_string(), "reg query \"HKLM\\Windows NT\\Fonts\"");
    }

    #[test]
    fn test_default_limits() {
        let runner = SystemRunner::default();
        assert_eq!(runner.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(runner.output_limit(), DEFAULT_OUTPUT_LIMIT);
    }

    #[test]
    fn test_returns_stdout() {
        let out = SystemRunner::default()
            .run(&sh("printf 'Hack\\nIosevka\\n'"))
            .expect("Should succeed");
        assert_eq!(out, "Hack\nIosevka\n");
    }

    #[test]
    fn test_nonzero_exit_is_an_error() {
        let err = SystemRunner::default()
            .run(&sh("echo 'no fontconfig' >&2; exit 3"))
            .expect_err("Should fail");
        match err {
            EnumerationError::ExitStatus { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "no fontconfig");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_program_is_an_io_error() {
        let err = SystemRunner::default()
            .run(&CommandSpec::new("fontpick-no-such-binary", Vec::<String>::new()))
            .expect_err("Should fail");
        assert!(matches!(err, EnumerationError::Io { .. }));
    }

    #[test]
    fn test_output_over_limit_is_rejected() {
        let runner = SystemRunner::new(DEFAULT_TIMEOUT, 1000);
        let err = runner
            .run(&sh("yes monospace | head -c 5000"))
            .expect_err("Should fail");
        assert!(matches!(err, EnumerationError::OutputTooLarge { limit: 1000, .. }));
    }

    #[test]
    fn test_output_at_limit_is_accepted() {
        let runner = SystemRunner::new(DEFAULT_TIMEOUT, 1000);
        let out = runner.run(&sh("yes a | head -c 1000")).expect("Should succeed");
        assert_eq!(out.len(), 1000);
    }

    #[test]
    fn test_timeout_kills_the_whole_pipeline() {
        let marker = format!("sleep {}", 40000 + std::process::id() % 10000);
        let runner = SystemRunner::new(Duration::from_millis(300), DEFAULT_OUTPUT_LIMIT);
        let err = runner
            .run(&sh(&format!("{} | sort -u", marker)))
            .expect_err("Should time out");
        assert!(err.to_string().contains("300ms"), "{}", err);

        thread::sleep(Duration::from_millis(200));
        let ps = Command::new("ps")
            .args(["-eo", "args="])
            .output()
            .expect("ps should run");
        let listing = String::from_utf8_lossy(&ps.stdout);
        assert!(
            !listing.lines().any(|line| line.trim() == marker),
            "`{}` survived the timeout",
            marker
        );
    }

    #[test]
    fn test_hung_command_times_out() {
        let runner = SystemRunner::new(Duration::from_millis(200), DEFAULT_OUTPUT_LIMIT);
        let started = Instant::now();
        let err = runner.run(&sh("sleep 10")).expect_err("Should time out");
        assert!(matches!(err, EnumerationError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
