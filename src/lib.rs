//! toolstrap - make sure `node`, `curl` and `wget` are installed.
//!
//! toolstrap probes each tool with its version flag and, for every tool
//! that is missing, runs the install sequence for the host platform:
//! nvm or the distro package manager on Linux, Homebrew on macOS and
//! Chocolatey on Windows.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and result aliases
//! - [`platform`] - OS and Linux distro detection
//! - [`requirements`] - Tool probing and install dispatch
//! - [`runner`] - Run orchestration and summary
//! - [`shell`] - Process execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use toolstrap::config::{SudoMode, ToolstrapConfig};
//! use toolstrap::platform::Platform;
//! use toolstrap::runner::run_on_platform;
//! use toolstrap::shell::{MockResponse, MockRunner};
//! use toolstrap::ui::MockUI;
//!
//! let mut runner = MockRunner::new();
//! runner.on_capture("node -v", MockResponse::ok("v20.11.0"));
//! runner.on_capture("curl -V", MockResponse::ok("curl 8.5.0"));
//!
//! let config = ToolstrapConfig {
//!     sudo: SudoMode::Always,
//!     ..Default::default()
//! };
//!
//! let mut ui = MockUI::new();
//! let summary = run_on_platform(
//!     &Platform::linux("Ubuntu 22.04"),
//!     &config,
//!     &runner,
//!     &mut ui,
//!     false,
//! );
//! assert_eq!(runner.executed_scripts(), vec!["sudo apt-get install -y wget"]);
//! assert_eq!(summary.exit_code(), 0);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod platform;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{Result, ToolstrapError};
