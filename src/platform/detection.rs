//! Operating system detection.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, ToolstrapError};
use crate::shell::CommandRunner;

use super::distro::{read_distro, LinuxDistro, OS_RELEASE_PATH};

/// Operating system family, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformId {
    Linux,
    Darwin,
    WindowsNt,
    /// Anything else. Never dispatched on.
    Other(String),
}

impl PlatformId {
    /// Map an OS type string to a platform.
    ///
    /// Accepts both uname-style names (`Linux`, `Darwin`, `Windows_NT`)
    /// and Rust's `std::env::consts::OS` values.
    pub fn from_os_type(os: &str) -> Self {
        match os {
            "Linux" | "linux" => PlatformId::Linux,
            "Darwin" | "macos" => PlatformId::Darwin,
            "Windows_NT" | "windows" => PlatformId::WindowsNt,
            other => PlatformId::Other(other.to_string()),
        }
    }

    /// The platform this binary is running on.
    pub fn current() -> Self {
        Self::from_os_type(std::env::consts::OS)
    }

    pub fn name(&self) -> &str {
        match self {
            PlatformId::Linux => "Linux",
            PlatformId::Darwin => "Darwin",
            PlatformId::WindowsNt => "Windows_NT",
            PlatformId::Other(os) => os,
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A supported platform, with the distro signature on Linux.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub id: PlatformId,
    pub distro: Option<LinuxDistro>,
}

impl Platform {
    pub fn linux(signature: &str) -> Self {
        Self {
            id: PlatformId::Linux,
            distro: Some(LinuxDistro::new(signature)),
        }
    }

    pub fn darwin() -> Self {
        Self {
            id: PlatformId::Darwin,
            distro: None,
        }
    }

    pub fn windows() -> Self {
        Self {
            id: PlatformId::WindowsNt,
            distro: None,
        }
    }
}

/// Detects the platform once at startup.
pub struct PlatformDetector<'a> {
    runner: &'a dyn CommandRunner,
    os_release: PathBuf,
    timeout: Option<Duration>,
}

impl<'a> PlatformDetector<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            os_release: PathBuf::from(OS_RELEASE_PATH),
            timeout: None,
        }
    }

    /// Read the distro identity from a different os-release file.
    pub fn with_os_release(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = path.into();
        self
    }

    /// Bound the `uname -v` call.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Detect the current platform.
    pub fn detect(&self) -> Result<Platform> {
        self.detect_os_type(std::env::consts::OS)
    }

    /// Detect using an explicit OS type string (for testing).
    ///
    /// Unknown OS types fail with `UnsupportedPlatform`.
    pub fn detect_os_type(&self, os: &str) -> Result<Platform> {
        let platform = match PlatformId::from_os_type(os) {
            PlatformId::Other(os) => return Err(ToolstrapError::UnsupportedPlatform { os }),
            PlatformId::Linux => Platform {
                id: PlatformId::Linux,
                distro: Some(read_distro(self.runner, &self.os_release, self.timeout)),
            },
            id => Platform { id, distro: None },
        };

        tracing::debug!("Detected platform {}", platform.id);
        Ok(platform)
    }
}
