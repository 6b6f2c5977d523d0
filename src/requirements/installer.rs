//! Installation of missing tools.
//!
//! [`plan_install`] picks the command sequence for a tool on a platform;
//! [`Installer`] runs it. Plans are pure data so the dispatch table can be
//! tested without running anything.
//!
//! | Tool | Linux | macOS | Windows |
//! |------|-------|-------|---------|
//! | node | nvm, then `nvm install node` | `brew install node` | Chocolatey, `nodejs.install` |
//! | curl | `apt-get` | Homebrew, `brew install curl` | Chocolatey, `curl` |
//! | wget | distro package manager | `brew install wget` | Chocolatey, `wget` |

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ToolstrapConfig;
use crate::error::{Result, ToolstrapError};
use crate::platform::{LinuxPackageManager, Platform, PlatformId};
use crate::shell::{CommandRunner, ShellCommand};
use crate::ui::UserInterface;

use super::probe::Prober;
use super::tools::{Tool, ToolCheck};

const HOMEBREW_INSTALL_URL: &str = "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";
const CHOCOLATEY_INSTALL_URL: &str = "https://community.chocolatey.org/install.ps1";

/// A package manager that must exist before a tool can be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    Homebrew,
    Chocolatey,
}

impl Prerequisite {
    pub fn name(&self) -> &'static str {
        match self {
            Prerequisite::Homebrew => "Homebrew",
            Prerequisite::Chocolatey => "Chocolatey",
        }
    }

    /// Version query used to detect the package manager.
    pub fn check(&self) -> ToolCheck {
        match self {
            Prerequisite::Homebrew => ToolCheck::new("brew", &["--version"]),
            Prerequisite::Chocolatey => ToolCheck::new("choco", &["-v"]),
        }
    }

    /// The network bootstrap installer.
    pub fn bootstrap_step(&self) -> InstallStep {
        match self {
            Prerequisite::Homebrew => InstallStep::new(
                "install Homebrew",
                ShellCommand::bash(format!(
                    "NONINTERACTIVE=1 /bin/bash -c \"$(curl -fsSL {})\"",
                    HOMEBREW_INSTALL_URL
                )),
            ),
            Prerequisite::Chocolatey => InstallStep::new(
                "install Chocolatey",
                ShellCommand::powershell(format!(
                    "[System.Net.ServicePointManager]::SecurityProtocol = \
                     [System.Net.ServicePointManager]::SecurityProtocol -bor 3072; \
                     iex ((New-Object System.Net.WebClient).DownloadString('{}'))",
                    CHOCOLATEY_INSTALL_URL
                )),
            ),
        }
    }

    /// Where a fresh install puts the binary, in case PATH has not caught up.
    pub fn known_bin_dirs(&self) -> Vec<PathBuf> {
        match self {
            Prerequisite::Homebrew => vec![
                PathBuf::from("/opt/homebrew/bin"),
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/home/linuxbrew/.linuxbrew/bin"),
            ],
            Prerequisite::Chocolatey => {
                let mut dirs = Vec::new();
                if let Some(root) = std::env::var_os("ChocolateyInstall") {
                    dirs.push(PathBuf::from(root).join("bin"));
                }
                let program_data = std::env::var_os("ProgramData")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"));
                dirs.push(program_data.join("chocolatey").join("bin"));
                dirs
            }
        }
    }
}

/// One blocking command in an install sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    /// Short label used in progress and error messages.
    pub description: String,
    pub command: ShellCommand,
}

impl InstallStep {
    pub fn new(description: impl Into<String>, command: ShellCommand) -> Self {
        Self {
            description: description.into(),
            command,
        }
    }
}

/// The full sequence for installing one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub tool: Tool,
    pub prerequisite: Option<Prerequisite>,
    pub steps: Vec<InstallStep>,
}

/// Knobs that change the generated commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSettings {
    pub nvm_version: String,
    /// Prefix Linux package manager commands with `sudo`.
    pub sudo: bool,
}

impl InstallSettings {
    pub fn from_config(config: &ToolstrapConfig) -> Self {
        Self {
            nvm_version: config.nvm_version.clone(),
            sudo: config.sudo.use_sudo(),
        }
    }
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            nvm_version: crate::config::DEFAULT_NVM_VERSION.to_string(),
            sudo: true,
        }
    }
}

/// Choose the install sequence for `tool` on `platform`.
pub fn plan_install(tool: Tool, platform: &Platform, settings: &InstallSettings) -> Result<InstallPlan> {
    let (prerequisite, steps) = match &platform.id {
        PlatformId::Linux => (None, linux_steps(tool, platform, settings)?),
        PlatformId::Darwin => {
            let step = InstallStep::new(
                format!("install {} with Homebrew", tool),
                ShellCommand::sh(format!("brew install {}", tool)),
            );
            // Only curl bootstraps Homebrew; node and wget assume it exists.
            let prerequisite = (tool == Tool::Curl).then_some(Prerequisite::Homebrew);
            (prerequisite, vec![step])
        }
        PlatformId::WindowsNt => {
            let package = match tool {
                Tool::Node => "nodejs.install",
                Tool::Curl => "curl",
                Tool::Wget => "wget",
            };
            let step = InstallStep::new(
                format!("install {} with Chocolatey", tool),
                ShellCommand::powershell(format!("choco install {} -y", package)),
            );
            (Some(Prerequisite::Chocolatey), vec![step])
        }
        PlatformId::Other(os) => {
            return Err(ToolstrapError::UnsupportedPlatform { os: os.clone() });
        }
    };

    Ok(InstallPlan {
        tool,
        prerequisite,
        steps,
    })
}

fn linux_steps(tool: Tool, platform: &Platform, settings: &InstallSettings) -> Result<Vec<InstallStep>> {
    match tool {
        Tool::Node => Ok(vec![
            InstallStep::new(
                "install nvm",
                // curl may itself be waiting to be installed; wget works too.
                ShellCommand::bash(format!(
                    "set -o pipefail; url=https://raw.githubusercontent.com/nvm-sh/nvm/{}/install.sh; \
                     if command -v curl >/dev/null 2>&1; then curl -o- \"$url\"; else wget -qO- \"$url\"; fi | bash",
                    settings.nvm_version
                )),
            ),
            InstallStep::new(
                "install node with nvm",
                ShellCommand::bash(
                    "export NVM_DIR=\"${NVM_DIR:-$HOME/.nvm}\"; . \"$NVM_DIR/nvm.sh\" && nvm install node",
                ),
            ),
        ]),
        Tool::Curl => Ok(vec![package_step(
            LinuxPackageManager::AptGet,
            tool,
            settings,
        )]),
        Tool::Wget => {
            let distro = platform.distro.as_ref();
            let family = distro.and_then(|d| d.family());
            match family {
                Some(family) => Ok(vec![package_step(family.package_manager(), tool, settings)]),
                None => Err(ToolstrapError::UnsupportedDistro {
                    tool: tool.to_string(),
                    signature: distro
                        .map(|d| d.signature().to_string())
                        .unwrap_or_default(),
                }),
            }
        }
    }
}

fn package_step(manager: LinuxPackageManager, tool: Tool, settings: &InstallSettings) -> InstallStep {
    InstallStep::new(
        format!("install {} with {}", tool, manager.name()),
        ShellCommand::sh(manager.install_script(tool.name(), settings.sudo)),
    )
}

/// What happened when an install was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// Dry run: the steps were printed, not run.
    Planned,
}

/// Installs one missing tool.
///
/// The run orchestration depends on this trait rather than on
/// [`Installer`] so its dispatch decisions can be observed in tests.
pub trait ToolInstaller {
    fn install(
        &mut self,
        tool: Tool,
        platform: &Platform,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallOutcome>;
}

/// Runs install plans through a [`CommandRunner`].
pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    settings: InstallSettings,
    probe_timeout: Option<Duration>,
    step_timeout: Option<Duration>,
    dry_run: bool,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, settings: InstallSettings) -> Self {
        Self {
            runner,
            settings,
            probe_timeout: None,
            step_timeout: None,
            dry_run: false,
        }
    }

    pub fn with_timeouts(mut self, probe: Option<Duration>, step: Option<Duration>) -> Self {
        self.probe_timeout = probe;
        self.step_timeout = step;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Make sure `prerequisite` is usable, bootstrapping it if needed.
    fn ensure_prerequisite(
        &self,
        prerequisite: Prerequisite,
        tool: Tool,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let prober = Prober::new(self.runner, self.probe_timeout);
        let check = prerequisite.check();

        if prober.probe(&check)?.is_present() {
            tracing::debug!("{} already available", prerequisite.name());
            return Ok(());
        }

        ui.message(&format!(
            "{} is required to install {} and was not found",
            prerequisite.name(),
            tool
        ));
        self.run_step(tool, &prerequisite.bootstrap_step(), ui)?;

        if self.dry_run || prober.probe(&check)?.is_present() {
            return Ok(());
        }

        // A fresh install is often not on this process's PATH yet.
        for dir in prerequisite.known_bin_dirs() {
            self.runner.prepend_path(&dir);
        }
        if prober.probe(&check)?.is_present() {
            return Ok(());
        }

        Err(ToolstrapError::PrerequisiteUnavailable {
            manager: prerequisite.name().to_string(),
            tool: tool.to_string(),
        })
    }

    fn run_step(&self, tool: Tool, step: &InstallStep, ui: &mut dyn UserInterface) -> Result<()> {
        if self.dry_run {
            ui.message(&format!("Would {}: {}", step.description, step.command));
            return Ok(());
        }

        ui.message(&format!("Running {}: {}", step.description, step.command));
        let result = self.runner.run(&step.command, self.step_timeout)?;
        tracing::debug!(
            "{} finished in {:?} with {:?}",
            step.description,
            result.duration,
            result.exit_code
        );

        if result.success {
            Ok(())
        } else {
            Err(ToolstrapError::InstallStepFailed {
                tool: tool.to_string(),
                step: step.description.clone(),
                code: result.exit_code,
            })
        }
    }
}

impl ToolInstaller for Installer<'_> {
    fn install(
        &mut self,
        tool: Tool,
        platform: &Platform,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallOutcome> {
        let plan = plan_install(tool, platform, &self.settings)?;

        if let Some(prerequisite) = plan.prerequisite {
            self.ensure_prerequisite(prerequisite, tool, ui)?;
        }

        for step in &plan.steps {
            self.run_step(tool, step, ui)?;
        }

        Ok(if self.dry_run {
            InstallOutcome::Planned
        } else {
            InstallOutcome::Installed
        })
    }
}
