//! The seam between toolstrap's decision logic and the host.

use std::io;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

use super::command::{self, CommandResult, ShellCommand};

/// Runs commands on behalf of the prober and installer.
///
/// [`SystemRunner`] talks to the real host; tests use
/// [`MockRunner`](super::MockRunner).
pub trait CommandRunner {
    /// Spawn a program directly and capture its output.
    fn capture(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> io::Result<CommandResult>;

    /// Run a shell command with inherited stdio.
    fn run(&self, command: &ShellCommand, timeout: Option<Duration>) -> Result<CommandResult>;

    /// Prepend a directory to the PATH seen by subsequent commands.
    fn prepend_path(&self, dir: &Path);
}

/// Runner backed by real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> io::Result<CommandResult> {
        tracing::debug!("capture: {} {}", program, args.join(" "));
        command::capture(program, args, timeout)
    }

    fn run(&self, command: &ShellCommand, timeout: Option<Duration>) -> Result<CommandResult> {
        tracing::debug!("run ({}): {}", command.shell.program(), command.script);
        command::run_inherited(command, timeout)
    }

    fn prepend_path(&self, dir: &Path) {
        let current = std::env::var_os("PATH").unwrap_or_default();
        let mut entries: Vec<_> = std::env::split_paths(&current).collect();
        if entries.iter().any(|p| p == dir) {
            return;
        }
        entries.insert(0, dir.to_path_buf());

        match std::env::join_paths(entries) {
            Ok(joined) => {
                tracing::debug!("PATH += {}", dir.display());
                std::env::set_var("PATH", joined);
            }
            Err(e) => tracing::warn!("Cannot add {} to PATH: {}", dir.display(), e),
        }
    }
}
