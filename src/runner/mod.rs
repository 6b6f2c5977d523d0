//! Run orchestration.
//!
//! Detects the platform once, then walks the configured tools in order:
//! probe, and for each absent tool hand it to the installer. One tool's
//! failure never stops the others.

pub mod summary;

pub use summary::{RunSummary, ToolOutcome, ToolReport};

use crate::config::ToolstrapConfig;
use crate::error::Result;
use crate::platform::{Platform, PlatformDetector};
use crate::requirements::{
    InstallOutcome, InstallSettings, Installer, ProbeOutcome, Prober, Tool, ToolInstaller,
};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

/// Detect the host platform, bounding `uname` by the probe timeout.
///
/// This is the only failure that stops a run; per-tool problems end up
/// in the summary.
pub fn detect_platform(config: &ToolstrapConfig, runner: &dyn CommandRunner) -> Result<Platform> {
    PlatformDetector::new(runner)
        .with_timeout(config.probe_timeout())
        .detect()
}

/// Bring every configured tool into place on `platform`.
pub fn run_on_platform(
    platform: &Platform,
    config: &ToolstrapConfig,
    runner: &dyn CommandRunner,
    ui: &mut dyn UserInterface,
    dry_run: bool,
) -> RunSummary {
    let prober = Prober::new(runner, config.probe_timeout());
    let mut installer = Installer::new(runner, InstallSettings::from_config(config))
        .with_timeouts(config.probe_timeout(), config.install_timeout())
        .with_dry_run(dry_run);

    bootstrap_tools(&config.tools, platform, &prober, &mut installer, ui, dry_run)
}

/// Probe each tool and install the absent ones, strictly in order.
pub fn bootstrap_tools(
    tools: &[Tool],
    platform: &Platform,
    prober: &Prober<'_>,
    installer: &mut dyn ToolInstaller,
    ui: &mut dyn UserInterface,
    dry_run: bool,
) -> RunSummary {
    let distro = platform.distro.as_ref().map(|d| d.signature().to_string());
    match &distro {
        Some(signature) if !signature.is_empty() => {
            ui.show_header(&format!("toolstrap on {} ({})", platform.id, signature))
        }
        _ => ui.show_header(&format!("toolstrap on {}", platform.id)),
    }

    let reports = tools
        .iter()
        .map(|&tool| ToolReport {
            tool,
            outcome: bootstrap_tool(tool, platform, prober, installer, ui),
        })
        .collect();

    let summary = RunSummary {
        platform: platform.id.name().to_string(),
        distro,
        dry_run,
        tools: reports,
    };
    ui.show_summary(&summary);
    summary
}

fn bootstrap_tool(
    tool: Tool,
    platform: &Platform,
    prober: &Prober<'_>,
    installer: &mut dyn ToolInstaller,
    ui: &mut dyn UserInterface,
) -> ToolOutcome {
    let reason = match prober.probe(&tool.check()) {
        Ok(ProbeOutcome::Present { version }) => {
            ui.success(&format!("{} is installed ({})", tool, version));
            return ToolOutcome::AlreadyPresent { version };
        }
        Ok(ProbeOutcome::Absent { reason }) => reason,
        Err(e) => {
            ui.error(&e.to_string());
            return ToolOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    ui.warning(&format!("{} is not installed: {}", tool, reason));
    tracing::debug!("Dispatching install of {} on {}", tool, platform.id);

    match installer.install(tool, platform, ui) {
        Ok(InstallOutcome::Installed) => {
            ui.success(&format!("{} installed", tool));
            ToolOutcome::Installed
        }
        Ok(InstallOutcome::Planned) => ToolOutcome::WouldInstall,
        Err(e) => {
            tracing::debug!("Installing {} failed: {:?}", tool, e);
            ui.error(&e.to_string());
            ToolOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolstrapError;
    use crate::platform::PlatformId;
    use crate::shell::{MockResponse, MockRunner};
    use crate::ui::MockUI;
    use std::io;

    /// Records dispatch calls without running anything.
    #[derive(Default)]
    struct RecordingInstaller {
        calls: Vec<(Tool, PlatformId)>,
        fail: Vec<Tool>,
    }

    impl ToolInstaller for RecordingInstaller {
        fn install(
            &mut self,
            tool: Tool,
            platform: &Platform,
            _ui: &mut dyn UserInterface,
        ) -> Result<InstallOutcome> {
            self.calls.push((tool, platform.id.clone()));
            if self.fail.contains(&tool) {
                return Err(ToolstrapError::InstallStepFailed {
                    tool: tool.to_string(),
                    step: "mock".to_string(),
                    code: Some(1),
                });
            }
            Ok(InstallOutcome::Installed)
        }
    }

    fn all_present() -> MockRunner {
        let mut runner = MockRunner::new();
        runner.on_capture("node -v", MockResponse::ok("v20.11.0"));
        runner.on_capture("curl -V", MockResponse::ok("curl 8.5.0"));
        runner.on_capture("wget -V", MockResponse::ok("GNU Wget 1.21.4"));
        runner
    }

    #[test]
    fn present_tools_are_never_dispatched() {
        let runner = all_present();
        let prober = Prober::new(&runner, None);
        let mut installer = RecordingInstaller::default();
        let mut ui = MockUI::new();

        let summary = bootstrap_tools(
            &Tool::ALL,
            &Platform::linux("Ubuntu"),
            &prober,
            &mut installer,
            &mut ui,
            false,
        );

        assert!(installer.calls.is_empty());
        assert_eq!(summary.already_present(), Tool::ALL.to_vec());
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn each_missing_tool_is_dispatched_once_with_platform() {
        for tool in Tool::ALL {
            let runner = MockRunner::new();
            let prober = Prober::new(&runner, None);
            let mut installer = RecordingInstaller::default();
            let mut ui = MockUI::new();

            bootstrap_tools(
                &[tool],
                &Platform::darwin(),
                &prober,
                &mut installer,
                &mut ui,
                false,
            );

            assert_eq!(installer.calls, vec![(tool, PlatformId::Darwin)]);
        }
    }

    #[test]
    fn non_zero_probe_dispatches_install() {
        let mut runner = all_present();
        runner.on_capture("wget -V", MockResponse::exit(1));
        let prober = Prober::new(&runner, None);
        let mut installer = RecordingInstaller::default();
        let mut ui = MockUI::new();

        let summary = bootstrap_tools(
            &Tool::ALL,
            &Platform::windows(),
            &prober,
            &mut installer,
            &mut ui,
            false,
        );

        assert_eq!(installer.calls, vec![(Tool::Wget, PlatformId::WindowsNt)]);
        assert_eq!(summary.installed(), vec![Tool::Wget]);
    }

    #[test]
    fn probe_errors_fail_without_dispatch() {
        let mut runner = all_present();
        runner.on_capture(
            "node -v",
            MockResponse::SpawnError(io::ErrorKind::PermissionDenied),
        );
        let prober = Prober::new(&runner, None);
        let mut installer = RecordingInstaller::default();
        let mut ui = MockUI::new();

        let summary = bootstrap_tools(
            &Tool::ALL,
            &Platform::darwin(),
            &prober,
            &mut installer,
            &mut ui,
            false,
        );

        assert!(installer.calls.is_empty());
        assert_eq!(summary.failed(), vec![Tool::Node]);
        assert_eq!(summary.already_present(), vec![Tool::Curl, Tool::Wget]);
        assert_eq!(ui.errors().len(), 1);
    }

    #[test]
    fn install_failure_does_not_stop_later_tools() {
        let runner = MockRunner::new();
        let prober = Prober::new(&runner, None);
        let mut installer = RecordingInstaller {
            fail: vec![Tool::Node],
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let summary = bootstrap_tools(
            &Tool::ALL,
            &Platform::darwin(),
            &prober,
            &mut installer,
            &mut ui,
            false,
        );

        assert_eq!(installer.calls.len(), 3);
        assert_eq!(summary.failed(), vec![Tool::Node]);
        assert_eq!(summary.installed(), vec![Tool::Curl, Tool::Wget]);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(ui.summaries().len(), 1);
        assert_eq!(ui.errors().len(), 1);
        assert!(ui.errors()[0].contains("node"));
    }

    #[test]
    fn header_names_platform_and_distro() {
        let runner = all_present();
        let prober = Prober::new(&runner, None);
        let mut installer = RecordingInstaller::default();
        let mut ui = MockUI::new();

        bootstrap_tools(
            &Tool::ALL,
            &Platform::linux("Ubuntu 22.04"),
            &prober,
            &mut installer,
            &mut ui,
            false,
        );

        assert_eq!(ui.headers(), &["toolstrap on Linux (Ubuntu 22.04)".to_string()]);
    }

    #[test]
    fn run_on_platform_uses_real_installer() {
        let mut runner = MockRunner::new();
        runner.on_capture("node -v", MockResponse::ok("v20.11.0"));
        runner.on_capture("wget -V", MockResponse::ok("GNU Wget 1.21.4"));
        runner.on_capture("brew --version", MockResponse::ok("Homebrew 4.2.0"));
        let mut ui = MockUI::new();

        let summary = run_on_platform(
            &Platform::darwin(),
            &ToolstrapConfig::default(),
            &runner,
            &mut ui,
            false,
        );

        assert_eq!(summary.installed(), vec![Tool::Curl]);
        assert_eq!(runner.executed_scripts(), vec!["brew install curl"]);
    }

    #[test]
    fn dry_run_reports_would_install() {
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        let config = ToolstrapConfig {
            tools: vec![Tool::Wget],
            ..Default::default()
        };

        let summary = run_on_platform(&Platform::linux("Fedora"), &config, &runner, &mut ui, true);

        assert!(summary.dry_run);
        assert_eq!(summary.tools[0].outcome, ToolOutcome::WouldInstall);
        assert!(runner.executed().is_empty());
        assert_eq!(summary.exit_code(), 0);
    }
}
