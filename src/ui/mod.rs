//! Operator-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for the real terminal
//! - [`MockUI`] for tests
//!
//! Install commands write straight to the inherited terminal; the UI only
//! frames them with status lines and the final summary.
//!
//! # Example
//!
//! ```
//! use toolstrap::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("curl is installed");
//! assert_eq!(ui.successes(), &["curl is installed".to_string()]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, ToolstrapTheme};

use crate::runner::RunSummary;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show the end-of-run summary.
    fn show_summary(&mut self, summary: &RunSummary);
}
