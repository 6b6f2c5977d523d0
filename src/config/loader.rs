//! Configuration file discovery and loading.
//!
//! Lookup order:
//! 1. An explicit path (`--config` or `TOOLSTRAP_CONFIG`), which must exist
//! 2. The user config at `~/.toolstrap/config.yml`, if present
//! 3. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ToolstrapConfig;
use crate::error::{Result, ToolstrapError};

/// Location of the user's config file.
pub fn user_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".toolstrap").join("config.yml"))
}

/// Load configuration following the lookup order above.
pub fn load_config(explicit: Option<&Path>) -> Result<ToolstrapConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ToolstrapError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return load_file(path);
    }

    match user_config_path() {
        Some(path) if path.exists() => load_file(&path),
        _ => {
            tracing::debug!("No config file found, using defaults");
            Ok(ToolstrapConfig::default())
        }
    }
}

/// Parse and validate a single config file.
pub fn load_file(path: &Path) -> Result<ToolstrapConfig> {
    tracing::debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(path)?;

    let config = if content.trim().is_empty() {
        ToolstrapConfig::default()
    } else {
        serde_yaml::from_str(&content).map_err(|e| ToolstrapError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::Tool;
    use tempfile::TempDir;

    #[test]
    fn explicit_missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ToolstrapError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "tools: [curl]\ninstall_timeout_secs: 600\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.tools, vec![Tool::Curl]);
        assert_eq!(config.install_timeout_secs, Some(600));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(load_file(&path).unwrap(), ToolstrapConfig::default());
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "tools: [node\n").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ToolstrapError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.yml"));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "tools: [wget, wget]\n").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ToolstrapError::ConfigValidationError { .. }));
    }

    #[test]
    fn user_config_lives_under_home() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with(".toolstrap/config.yml"));
        }
    }
}
