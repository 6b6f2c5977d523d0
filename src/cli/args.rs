//! CLI argument definitions.
//!
//! toolstrap needs no arguments; every flag here is optional.

use clap::Parser;
use std::path::PathBuf;

/// toolstrap - Install node, curl, and wget if they are missing.
#[derive(Debug, Parser)]
#[command(name = "toolstrap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides ~/.toolstrap/config.yml)
    #[arg(short, long, env = "TOOLSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print install commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Only show warnings, errors and the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
