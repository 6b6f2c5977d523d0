//! Scripted command runner for tests.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything.
//! Captured commands are answered from a table keyed by the full command
//! line (`"node -v"`); anything not in the table behaves like a missing
//! binary. Shell commands succeed unless a registered fragment matches.
//!
//! # Example
//!
//! ```
//! use toolstrap::shell::{CommandRunner, MockResponse, MockRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.on_capture("curl -V", MockResponse::ok("curl 8.5.0"));
//!
//! let result = runner.capture("curl", &["-V"], None).unwrap();
//! assert!(result.success);
//! assert!(runner.capture("wget", &["-V"], None).is_err());
//! assert_eq!(runner.captured(), vec!["curl -V", "wget -V"]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, ToolstrapError};

use super::command::{CommandResult, ShellCommand};
use super::runner::CommandRunner;

/// Scripted answer to a captured command.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// The program ran and exited with `code`.
    Output { code: i32, stdout: String },
    /// The binary does not exist.
    NotFound,
    /// Spawning failed with some other error.
    SpawnError(io::ErrorKind),
}

impl MockResponse {
    /// Exit 0 with the given stdout.
    pub fn ok(stdout: &str) -> Self {
        Self::Output {
            code: 0,
            stdout: stdout.to_string(),
        }
    }

    /// Exit with `code` and no output.
    pub fn exit(code: i32) -> Self {
        Self::Output {
            code,
            stdout: String::new(),
        }
    }
}

/// Command runner that records calls and replays scripted results.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: RefCell<HashMap<String, VecDeque<MockResponse>>>,
    failures: Vec<(String, i32)>,
    captured: RefCell<Vec<String>>,
    executed: RefCell<Vec<ShellCommand>>,
    path_additions: RefCell<Vec<PathBuf>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every capture of `command_line` with `response`.
    pub fn on_capture(&mut self, command_line: &str, response: MockResponse) {
        self.queue_capture(command_line, vec![response]);
    }

    /// Answer successive captures of `command_line` in order.
    ///
    /// The last response repeats once the queue is down to one entry.
    pub fn queue_capture(&mut self, command_line: &str, responses: Vec<MockResponse>) {
        self.responses
            .borrow_mut()
            .insert(command_line.to_string(), responses.into());
    }

    /// Make any shell command whose script contains `fragment` exit with `code`.
    pub fn fail_when(&mut self, fragment: &str, code: i32) {
        self.failures.push((fragment.to_string(), code));
    }

    /// Command lines passed to `capture`, in call order.
    pub fn captured(&self) -> Vec<String> {
        self.captured.borrow().clone()
    }

    /// Shell commands passed to `run`, in call order.
    pub fn executed(&self) -> Vec<ShellCommand> {
        self.executed.borrow().clone()
    }

    /// Scripts of the shell commands passed to `run`.
    pub fn executed_scripts(&self) -> Vec<String> {
        self.executed
            .borrow()
            .iter()
            .map(|c| c.script.clone())
            .collect()
    }

    /// Directories passed to `prepend_path`.
    pub fn path_additions(&self) -> Vec<PathBuf> {
        self.path_additions.borrow().clone()
    }

    fn next_response(&self, key: &str) -> Option<MockResponse> {
        let mut responses = self.responses.borrow_mut();
        let queue = responses.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl CommandRunner for MockRunner {
    fn capture(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Option<Duration>,
    ) -> io::Result<CommandResult> {
        let key = if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        };
        self.captured.borrow_mut().push(key.clone());

        match self.next_response(&key) {
            Some(MockResponse::Output { code: 0, stdout }) => {
                Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
            }
            Some(MockResponse::Output { code, stdout }) => Ok(CommandResult::failure(
                Some(code),
                stdout,
                String::new(),
                Duration::ZERO,
            )),
            Some(MockResponse::SpawnError(kind)) => Err(io::Error::new(kind, "mock spawn error")),
            Some(MockResponse::NotFound) | None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: command not found", program),
            )),
        }
    }

    fn run(&self, command: &ShellCommand, _timeout: Option<Duration>) -> Result<CommandResult> {
        self.executed.borrow_mut().push(command.clone());

        let failure = self
            .failures
            .iter()
            .find(|(fragment, _)| command.script.contains(fragment.as_str()));

        match failure {
            Some((_, code)) if *code < 0 => Err(ToolstrapError::CommandSpawn {
                command: command.script.clone(),
                message: "mock spawn error".to_string(),
            }),
            Some((_, code)) => Ok(CommandResult::failure(
                Some(*code),
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
            None => Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
        }
    }

    fn prepend_path(&self, dir: &Path) {
        self.path_additions.borrow_mut().push(dir.to_path_buf());
    }
}
