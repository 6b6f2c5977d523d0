//! End-of-run summary.

use serde::Serialize;

use crate::requirements::Tool;

/// What happened to one tool during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    /// The version probe succeeded; nothing was installed.
    AlreadyPresent { version: String },
    /// The tool was missing and its install sequence succeeded.
    Installed,
    /// Dry run: the tool is missing and would have been installed.
    WouldInstall,
    /// Probing or installing failed.
    Failed { reason: String },
}

/// Outcome for a single tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolReport {
    pub tool: Tool,
    #[serde(flatten)]
    pub outcome: ToolOutcome,
}

/// Everything the run did, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// OS type name (`Linux`, `Darwin`, `Windows_NT`).
    pub platform: String,
    /// Linux distro signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distro: Option<String>,
    pub dry_run: bool,
    pub tools: Vec<ToolReport>,
}

impl RunSummary {
    fn tools_where(&self, pred: impl Fn(&ToolOutcome) -> bool) -> Vec<Tool> {
        self.tools
            .iter()
            .filter(|r| pred(&r.outcome))
            .map(|r| r.tool)
            .collect()
    }

    pub fn already_present(&self) -> Vec<Tool> {
        self.tools_where(|o| matches!(o, ToolOutcome::AlreadyPresent { .. }))
    }

    pub fn installed(&self) -> Vec<Tool> {
        self.tools_where(|o| matches!(o, ToolOutcome::Installed))
    }

    pub fn failed(&self) -> Vec<Tool> {
        self.tools_where(|o| matches!(o, ToolOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        !self.failed().is_empty()
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> u8 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }
}
