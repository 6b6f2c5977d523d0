//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::runner::{RunSummary, ToolOutcome};

use super::{should_use_colors, OutputMode, ToolstrapTheme, UserInterface};

/// Terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: ToolstrapTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI writing to a specific terminal stream.
    pub fn with_term(term: Term, mode: OutputMode) -> Self {
        let theme = if should_use_colors() && term.is_term() {
            ToolstrapTheme::new()
        } else {
            ToolstrapTheme::plain()
        };

        Self { term, theme, mode }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_header(title)).ok();
            writeln!(self.term).ok();
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        writeln!(self.term).ok();
        writeln!(self.term, "{}", self.theme.key.apply_to("Summary")).ok();

        for report in &summary.tools {
            let line = match &report.outcome {
                ToolOutcome::AlreadyPresent { version } => self
                    .theme
                    .format_skipped(&format!("{} already present ({})", report.tool, version)),
                ToolOutcome::Installed => self
                    .theme
                    .format_success(&format!("{} installed", report.tool)),
                ToolOutcome::WouldInstall => self
                    .theme
                    .format_warning(&format!("{} would be installed", report.tool)),
                ToolOutcome::Failed { reason } => self
                    .theme
                    .format_error(&format!("{} failed: {}", report.tool, reason)),
            };
            writeln!(self.term, "  {}", line).ok();
        }
    }
}
