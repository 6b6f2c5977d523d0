//! Availability probing.
//!
//! A tool is present when its version query exits 0 and prints something
//! on stdout. Stdout is authoritative: `node -v`, `curl -V` and `wget -V`
//! all report there.
//!
//! A missing binary is an absence, not an error. Any other spawn failure
//! (permission denied, timeout) is surfaced as `ProbeExecution` so that a
//! broken install is never mistaken for a missing one.
//!
//! # Example
//!
//! ```
//! use toolstrap::requirements::{Prober, Tool};
//! use toolstrap::shell::{MockResponse, MockRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.on_capture("node -v", MockResponse::ok("v20.11.0\n"));
//!
//! let prober = Prober::new(&runner, None);
//! let outcome = prober.probe(&Tool::Node.check()).unwrap();
//! assert_eq!(outcome.version(), Some("v20.11.0"));
//! ```

use std::io;
use std::time::Duration;

use crate::error::{Result, ToolstrapError};
use crate::shell::{CommandResult, CommandRunner};

use super::status::{AbsenceReason, ProbeOutcome};
use super::tools::ToolCheck;

/// Runs version queries through a [`CommandRunner`].
pub struct Prober<'a> {
    runner: &'a dyn CommandRunner,
    timeout: Option<Duration>,
}

impl<'a> Prober<'a> {
    pub fn new(runner: &'a dyn CommandRunner, timeout: Option<Duration>) -> Self {
        Self { runner, timeout }
    }

    /// Probe one tool.
    pub fn probe(&self, check: &ToolCheck) -> Result<ProbeOutcome> {
        let outcome = match self.runner.capture(check.program, check.args, self.timeout) {
            Ok(result) => classify(&result),
            Err(e) if e.kind() == io::ErrorKind::NotFound => ProbeOutcome::Absent {
                reason: AbsenceReason::NotFound,
            },
            Err(e) => {
                return Err(ToolstrapError::ProbeExecution {
                    tool: check.program.to_string(),
                    message: e.to_string(),
                })
            }
        };

        tracing::debug!("{} -> {:?}", check.command_line(), outcome);
        Ok(outcome)
    }
}

/// Decide presence from a completed version query.
pub fn classify(result: &CommandResult) -> ProbeOutcome {
    if !result.success {
        return ProbeOutcome::Absent {
            reason: AbsenceReason::NonZeroExit(result.exit_code),
        };
    }

    match result.stdout.lines().map(str::trim).find(|l| !l.is_empty()) {
        Some(line) => ProbeOutcome::Present {
            version: line.to_string(),
        },
        None => ProbeOutcome::Absent {
            reason: AbsenceReason::EmptyOutput,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::Tool;
    use crate::shell::{MockResponse, MockRunner};

    fn probe_with(response: Option<MockResponse>, tool: Tool) -> Result<ProbeOutcome> {
        let mut runner = MockRunner::new();
        if let Some(response) = response {
            runner.on_capture(&tool.check().command_line(), response);
        }
        Prober::new(&runner, None).probe(&tool.check())
    }

    #[test]
    fn successful_query_is_present() {
        let outcome = probe_with(
            Some(MockResponse::ok("curl 8.5.0 (x86_64-pc-linux-gnu)\nRelease-Date: 2023-12-06\n")),
            Tool::Curl,
        )
        .unwrap();
        assert_eq!(outcome.version(), Some("curl 8.5.0 (x86_64-pc-linux-gnu)"));
    }

    #[test]
    fn missing_binary_is_absent() {
        let outcome = probe_with(None, Tool::Wget).unwrap();
        assert_eq!(
            outcome,
            ProbeOutcome::Absent {
                reason: AbsenceReason::NotFound
            }
        );
    }

    #[test]
    fn non_zero_exit_is_absent() {
        let outcome = probe_with(Some(MockResponse::exit(127)), Tool::Node).unwrap();
        assert_eq!(
            outcome,
            ProbeOutcome::Absent {
                reason: AbsenceReason::NonZeroExit(Some(127))
            }
        );
    }

    #[test]
    fn blank_output_is_absent() {
        let outcome = probe_with(Some(MockResponse::ok("  \n\n")), Tool::Node).unwrap();
        assert_eq!(
            outcome,
            ProbeOutcome::Absent {
                reason: AbsenceReason::EmptyOutput
            }
        );
    }

    #[test]
    fn permission_denied_is_an_error() {
        let err = probe_with(
            Some(MockResponse::SpawnError(io::ErrorKind::PermissionDenied)),
            Tool::Node,
        )
        .unwrap_err();
        assert!(matches!(err, ToolstrapError::ProbeExecution { tool, .. } if tool == "node"));
    }

    #[test]
    fn timeout_is_an_error() {
        let err = probe_with(Some(MockResponse::SpawnError(io::ErrorKind::TimedOut)), Tool::Curl)
            .unwrap_err();
        assert!(matches!(err, ToolstrapError::ProbeExecution { .. }));
    }

    #[test]
    fn probe_real_missing_binary() {
        let runner = crate::shell::SystemRunner;
        let check = ToolCheck::new("this-command-does-not-exist-12345", &["-v"]);
        let outcome = Prober::new(&runner, Some(Duration::from_secs(5)))
            .probe(&check)
            .unwrap();
        assert!(!outcome.is_present());
    }
}
