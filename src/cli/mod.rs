//! Command-line interface for toolstrap.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`app`] - Config loading, UI selection and exit code mapping

pub mod app;
pub mod args;

pub use app::{execute, execute_with_ui};
pub use args::Cli;
