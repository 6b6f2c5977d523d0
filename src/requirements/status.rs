//! Probe outcome types.
//!
//! Each version probe produces a `ProbeOutcome` that says whether a tool
//! is present and, if not, which signal showed it missing.

use std::fmt;

/// Why a probe concluded a tool is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsenceReason {
    /// The binary could not be found.
    NotFound,
    /// The version query ran but exited non-zero (None if killed by signal).
    NonZeroExit(Option<i32>),
    /// The version query succeeded but printed nothing on stdout.
    EmptyOutput,
}

impl fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsenceReason::NotFound => f.write_str("command not found"),
            AbsenceReason::NonZeroExit(Some(code)) => {
                write!(f, "version query exited with code {}", code)
            }
            AbsenceReason::NonZeroExit(None) => f.write_str("version query was terminated"),
            AbsenceReason::EmptyOutput => f.write_str("version query printed nothing"),
        }
    }
}

/// The result of probing a single tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Tool answered its version query.
    Present {
        /// First non-empty line of the version output.
        version: String,
    },

    /// Tool is not usable.
    Absent { reason: AbsenceReason },
}

impl ProbeOutcome {
    pub fn is_present(&self) -> bool {
        matches!(self, ProbeOutcome::Present { .. })
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Present { version } => Some(version),
            ProbeOutcome::Absent { .. } => None,
        }
    }
}
