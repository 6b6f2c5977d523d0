//! Process execution.
//!
//! Probes spawn their program directly and capture its output, so a
//! missing binary surfaces as an `io::ErrorKind::NotFound` spawn error.
//! Install steps run through a shell with inherited stdio so package
//! manager progress reaches the operator as it happens.

use crate::error::{Result, ToolstrapError};
use std::fmt;
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output. Empty when stdio was inherited.
    pub stdout: String,

    /// Standard error. Empty when stdio was inherited.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        if status.success() {
            Self::success(stdout, stderr, duration)
        } else {
            Self::failure(status.code(), stdout, stderr, duration)
        }
    }
}

/// Interpreter used to run an install script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// POSIX `sh -c`.
    Sh,
    /// `bash -c`, for scripts relying on pipefail or sourced functions.
    Bash,
    /// Windows PowerShell with the execution policy bypassed for the process.
    PowerShell,
}

impl ShellKind {
    /// Executable name for this shell.
    pub fn program(&self) -> &'static str {
        match self {
            ShellKind::Sh => "sh",
            ShellKind::Bash => "bash",
            ShellKind::PowerShell => "powershell",
        }
    }

    /// Arguments that make the shell run `script`.
    pub fn args(&self, script: &str) -> Vec<String> {
        let mut args: Vec<String> = match self {
            ShellKind::Sh | ShellKind::Bash => vec!["-c".to_string()],
            ShellKind::PowerShell => [
                "-NoProfile",
                "-NonInteractive",
                "-ExecutionPolicy",
                "Bypass",
                "-Command",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        };
        args.push(script.to_string());
        args
    }
}

/// A script together with the shell that runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub shell: ShellKind,
    pub script: String,
}

impl ShellCommand {
    pub fn sh(script: impl Into<String>) -> Self {
        Self {
            shell: ShellKind::Sh,
            script: script.into(),
        }
    }

    pub fn bash(script: impl Into<String>) -> Self {
        Self {
            shell: ShellKind::Bash,
            script: script.into(),
        }
    }

    pub fn powershell(script: impl Into<String>) -> Self {
        Self {
            shell: ShellKind::PowerShell,
            script: script.into(),
        }
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(self.shell.program());
        cmd.args(self.shell.args(&self.script));
        cmd
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.script)
    }
}

/// Spawn `program` directly and capture its output.
///
/// Spawn failures come back as the raw `io::Error` so callers can tell a
/// missing binary apart from other failures. Exceeding `timeout` kills the
/// child and yields `io::ErrorKind::TimedOut`.
pub fn capture(program: &str, args: &[&str], timeout: Option<Duration>) -> io::Result<CommandResult> {
    let start = Instant::now();

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let Some(status) = wait_with_timeout(&mut child, timeout)? else {
        // Readers are left detached: a grandchild may still hold the pipes.
        return Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!(
                "timed out after {}s",
                timeout.map(|t| t.as_secs()).unwrap_or_default()
            ),
        ));
    };

    let stdout = join_reader(stdout_reader);
    let stderr = join_reader(stderr_reader);

    Ok(CommandResult::from_status(
        status,
        stdout,
        stderr,
        start.elapsed(),
    ))
}

/// Run a shell command with inherited stdio, blocking until it exits.
///
/// A non-zero exit is returned as a failed [`CommandResult`]; only a spawn
/// failure or timeout is an `Err`.
pub fn run_inherited(command: &ShellCommand, timeout: Option<Duration>) -> Result<CommandResult> {
    let start = Instant::now();

    let mut child = command
        .to_command()
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| ToolstrapError::CommandSpawn {
            command: command.script.clone(),
            message: e.to_string(),
        })?;

    match wait_with_timeout(&mut child, timeout)? {
        Some(status) => Ok(CommandResult::from_status(
            status,
            String::new(),
            String::new(),
            start.elapsed(),
        )),
        None => Err(ToolstrapError::CommandTimedOut {
            command: command.script.clone(),
            seconds: timeout.map(|t| t.as_secs()).unwrap_or_default(),
        }),
    }
}

/// Wait for `child`, killing it once `timeout` elapses.
///
/// Returns `Ok(None)` when the child was killed.
fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(limit) = timeout else {
        return child.wait().map(Some);
    };

    // A limit past the end of the clock means no deadline.
    let Some(deadline) = Instant::now().checked_add(limit) else {
        return child.wait().map(Some);
    };
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut source: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = source.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default()
}
