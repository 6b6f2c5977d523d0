//! Configuration schema.
//!
//! Every field has a default, so an absent or empty config file is valid.
//!
//! ```yaml
//! tools: [node, curl, wget]
//! probe_timeout_secs: 30
//! install_timeout_secs: 1800
//! nvm_version: v0.35.3
//! sudo: auto
//! ```

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolstrapError};
use crate::requirements::Tool;
use crate::shell::is_elevated;

/// Default nvm release installed on Linux.
pub const DEFAULT_NVM_VERSION: &str = "v0.35.3";

/// Default bound on a single version probe.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Largest accepted timeout (one week).
pub const MAX_TIMEOUT_SECS: u64 = 7 * 24 * 60 * 60;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolstrapConfig {
    /// Tools to check, in order.
    pub tools: Vec<Tool>,

    /// Timeout for each version probe. `null` disables it.
    pub probe_timeout_secs: Option<u64>,

    /// Timeout for each install step. Unbounded when unset.
    pub install_timeout_secs: Option<u64>,

    /// nvm release tag used to bootstrap Node on Linux.
    pub nvm_version: String,

    /// When to prefix Linux package manager commands with `sudo`.
    pub sudo: SudoMode,
}

impl Default for ToolstrapConfig {
    fn default() -> Self {
        Self {
            tools: Tool::ALL.to_vec(),
            probe_timeout_secs: Some(DEFAULT_PROBE_TIMEOUT_SECS),
            install_timeout_secs: None,
            nvm_version: DEFAULT_NVM_VERSION.to_string(),
            sudo: SudoMode::Auto,
        }
    }
}

impl ToolstrapConfig {
    pub fn probe_timeout(&self) -> Option<Duration> {
        self.probe_timeout_secs.map(Duration::from_secs)
    }

    pub fn install_timeout(&self) -> Option<Duration> {
        self.install_timeout_secs.map(Duration::from_secs)
    }

    /// Reject values serde accepts but toolstrap cannot use.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for tool in &self.tools {
            if !seen.insert(tool) {
                return Err(ToolstrapError::ConfigValidationError {
                    message: format!("tool '{}' is listed more than once", tool),
                });
            }
        }

        if self.nvm_version.trim().is_empty() {
            return Err(ToolstrapError::ConfigValidationError {
                message: "nvm_version must not be empty".to_string(),
            });
        }

        if self.probe_timeout_secs == Some(0) || self.install_timeout_secs == Some(0) {
            return Err(ToolstrapError::ConfigValidationError {
                message: "timeouts must be at least 1 second".to_string(),
            });
        }

        let too_long = [self.probe_timeout_secs, self.install_timeout_secs]
            .into_iter()
            .flatten()
            .any(|secs| secs > MAX_TIMEOUT_SECS);
        if too_long {
            return Err(ToolstrapError::ConfigValidationError {
                message: format!("timeouts must not exceed {} seconds", MAX_TIMEOUT_SECS),
            });
        }

        Ok(())
    }
}

/// Policy for running Linux package managers through `sudo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SudoMode {
    /// Use sudo unless already running as root.
    #[default]
    Auto,
    Always,
    Never,
}

impl SudoMode {
    /// Whether commands should be prefixed with `sudo`.
    pub fn use_sudo(&self) -> bool {
        match self {
            SudoMode::Auto => !is_elevated(),
            SudoMode::Always => true,
            SudoMode::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_check_all_tools() {
        let config = ToolstrapConfig::default();
        assert_eq!(config.tools, vec![Tool::Node, Tool::Curl, Tool::Wget]);
        assert_eq!(config.probe_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.install_timeout(), None);
        assert_eq!(config.nvm_version, "v0.35.3");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: ToolstrapConfig = serde_yaml::from_str("tools: [wget]\nsudo: never\n").unwrap();
        assert_eq!(config.tools, vec![Tool::Wget]);
        assert_eq!(config.sudo, SudoMode::Never);
        assert_eq!(config.nvm_version, DEFAULT_NVM_VERSION);
    }

    #[test]
    fn null_probe_timeout_disables_it() {
        let config: ToolstrapConfig = serde_yaml::from_str("probe_timeout_secs: null").unwrap();
        assert_eq!(config.probe_timeout(), None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: std::result::Result<ToolstrapConfig, _> = serde_yaml::from_str("retries: 3");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let result: std::result::Result<ToolstrapConfig, _> =
            serde_yaml::from_str("tools: [node, git]");
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_tools_fail_validation() {
        let config = ToolstrapConfig {
            tools: vec![Tool::Curl, Tool::Curl],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("curl"));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config = ToolstrapConfig {
            install_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_timeout_fails_validation() {
        let config: ToolstrapConfig =
            serde_yaml::from_str("install_timeout_secs: 18446744073709551615").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must not exceed"));

        let config = ToolstrapConfig {
            probe_timeout_secs: Some(MAX_TIMEOUT_SECS),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sudo_mode_explicit_values() {
        assert!(SudoMode::Always.use_sudo());
        assert!(!SudoMode::Never.use_sudo());
    }
}
