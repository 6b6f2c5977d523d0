//! Top-level command execution.

use console::Term;

use crate::config::{load_config, ToolstrapConfig};
use crate::error::Result;
use crate::platform::Platform;
use crate::runner::{self, RunSummary};
use crate::shell::CommandRunner;
use crate::ui::{OutputMode, TerminalUI, UserInterface};

use super::Cli;

/// Run toolstrap for parsed arguments, returning the process exit code.
pub fn execute(cli: &Cli, runner: &dyn CommandRunner) -> u8 {
    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    // Keep stdout clean for the JSON document.
    let term = if cli.json {
        Term::stderr()
    } else {
        Term::stdout()
    };
    let mut ui = TerminalUI::with_term(term, mode);

    match execute_with_ui(cli, runner, &mut ui) {
        Ok(summary) => {
            if cli.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        ui.error(&format!("Cannot serialize summary: {}", e));
                        return 1;
                    }
                }
            }
            summary.exit_code()
        }
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            1
        }
    }
}

/// Load configuration and run against the host.
pub fn execute_with_ui(
    cli: &Cli,
    runner: &dyn CommandRunner,
    ui: &mut dyn UserInterface,
) -> Result<RunSummary> {
    let config = load_config(cli.config.as_deref())?;
    tracing::debug!("Using config: {:?}", config);

    let platform = runner::detect_platform(&config, runner)?;
    Ok(execute_on_platform(cli, &config, &platform, runner, ui))
}

fn execute_on_platform(
    cli: &Cli,
    config: &ToolstrapConfig,
    platform: &Platform,
    runner: &dyn CommandRunner,
    ui: &mut dyn UserInterface,
) -> RunSummary {
    if cli.dry_run {
        ui.message("Running in dry-run mode: nothing will be installed");
    }

    runner::run_on_platform(platform, config, runner, ui, cli.dry_run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolstrapError;
    use crate::config::SudoMode;
    use crate::runner::ToolOutcome;
    use crate::shell::{MockResponse, MockRunner};
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn missing_config_is_an_error() {
        let cli = Cli::try_parse_from(["toolstrap", "--config", "/nonexistent/toolstrap.yml"])
            .unwrap();
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let err = execute_with_ui(&cli, &runner, &mut ui).unwrap_err();
        assert!(matches!(err, ToolstrapError::ConfigNotFound { .. }));
        assert!(runner.captured().is_empty());
    }

    #[test]
    fn dry_run_is_announced_and_installs_nothing() {
        let cli = Cli::try_parse_from(["toolstrap", "--dry-run"]).unwrap();
        let config = ToolstrapConfig {
            sudo: SudoMode::Always,
            ..Default::default()
        };
        let mut runner = MockRunner::new();
        runner.on_capture("node -v", MockResponse::ok("v20.11.0"));
        let mut ui = MockUI::new();

        let summary = execute_on_platform(
            &cli,
            &config,
            &Platform::linux("Ubuntu 22.04"),
            &runner,
            &mut ui,
        );

        assert!(ui.messages()[0].contains("dry-run"));
        assert!(summary.dry_run);
        assert!(runner.executed().is_empty());
        assert_eq!(
            summary
                .tools
                .iter()
                .map(|r| r.outcome.clone())
                .collect::<Vec<_>>(),
            vec![
                ToolOutcome::AlreadyPresent {
                    version: "v20.11.0".to_string()
                },
                ToolOutcome::WouldInstall,
                ToolOutcome::WouldInstall,
            ]
        );
        assert!(ui
            .messages()
            .iter()
            .any(|m| m == "Would install wget with apt-get: sudo apt-get install -y wget"));
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn without_dry_run_nothing_is_announced() {
        let cli = Cli::try_parse_from(["toolstrap"]).unwrap();
        let config = ToolstrapConfig {
            tools: vec![crate::requirements::Tool::Curl],
            ..Default::default()
        };
        let mut runner = MockRunner::new();
        runner.on_capture("curl -V", MockResponse::ok("curl 8.5.0"));
        let mut ui = MockUI::new();

        let summary = execute_on_platform(&cli, &config, &Platform::darwin(), &runner, &mut ui);

        assert!(ui.messages().is_empty());
        assert!(!summary.dry_run);
    }
}
