//! Shell command execution.

pub mod command;
pub mod mock;
pub mod platform;
pub mod runner;

pub use command::{capture, run_inherited, CommandResult, ShellCommand, ShellKind};
pub use mock::{MockResponse, MockRunner};
pub use platform::is_elevated;
pub use runner::{CommandRunner, SystemRunner};
