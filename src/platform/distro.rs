//! Linux distribution signatures and package manager selection.
//!
//! The signature is the kernel version string from `uname -v` followed by
//! the identity fields of `/etc/os-release`. Either source may be missing;
//! the signature is then simply shorter, and an empty or unrecognized
//! signature has no [`DistroFamily`].
//!
//! The family comes from os-release (`ID`, then `ID_LIKE`, then `NAME`)
//! when it names a known distro. The kernel string is only a fallback,
//! since containers report the host kernel.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use regex::RegexBuilder;

use crate::shell::CommandRunner;

/// Default location of the os-release file.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Signature patterns, checked in order.
const FAMILY_PATTERNS: &[(&str, DistroFamily)] = &[
    (r"ubuntu|debian", DistroFamily::Debian),
    (r"fedora|centos|rhel", DistroFamily::RedHat),
    (r"archlinux|\barch\b", DistroFamily::Arch),
    (r"opensuse", DistroFamily::Suse),
];

/// Group of distributions sharing a package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistroFamily {
    Debian,
    RedHat,
    Arch,
    Suse,
}

impl DistroFamily {
    /// The package manager used to install system packages.
    pub fn package_manager(&self) -> LinuxPackageManager {
        match self {
            DistroFamily::Debian => LinuxPackageManager::AptGet,
            DistroFamily::RedHat => LinuxPackageManager::Yum,
            DistroFamily::Arch => LinuxPackageManager::Pacman,
            DistroFamily::Suse => LinuxPackageManager::Zypper,
        }
    }
}

/// System package managers toolstrap knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinuxPackageManager {
    AptGet,
    Yum,
    Pacman,
    Zypper,
}

impl LinuxPackageManager {
    pub fn name(&self) -> &'static str {
        match self {
            LinuxPackageManager::AptGet => "apt-get",
            LinuxPackageManager::Yum => "yum",
            LinuxPackageManager::Pacman => "pacman",
            LinuxPackageManager::Zypper => "zypper",
        }
    }

    /// Non-interactive install command for `package`.
    pub fn install_script(&self, package: &str, sudo: bool) -> String {
        let prefix = if sudo { "sudo " } else { "" };
        match self {
            LinuxPackageManager::AptGet => format!("{}apt-get install -y {}", prefix, package),
            LinuxPackageManager::Yum => format!("{}yum install -y {}", prefix, package),
            LinuxPackageManager::Pacman => {
                format!("{}pacman -Sy --noconfirm {}", prefix, package)
            }
            LinuxPackageManager::Zypper => {
                format!("{}zypper --non-interactive install {}", prefix, package)
            }
        }
    }
}

/// Identity fields of an os-release file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub name: Option<String>,
    pub id: Option<String>,
    pub id_like: Option<String>,
}

impl OsRelease {
    /// Extract `NAME`, `ID` and `ID_LIKE` from os-release content.
    pub fn parse(content: &str) -> Self {
        let mut release = Self::default();
        for (key, value) in content.lines().filter_map(|line| line.split_once('=')) {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if value.is_empty() {
                continue;
            }
            let slot = match key.trim() {
                "NAME" => &mut release.name,
                "ID" => &mut release.id,
                "ID_LIKE" => &mut release.id_like,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        release
    }

    /// Values in signature order.
    fn display_values(&self) -> impl Iterator<Item = &str> {
        [&self.name, &self.id, &self.id_like]
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Values from most to least specific.
    fn identity_values(&self) -> impl Iterator<Item = &str> {
        [&self.id, &self.id_like, &self.name]
            .into_iter()
            .flatten()
            .map(String::as_str)
    }
}

/// Free-form description of the running Linux distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinuxDistro {
    signature: String,
    os_release: OsRelease,
}

impl LinuxDistro {
    /// A distro known only by its signature.
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            os_release: OsRelease::default(),
        }
    }

    /// Build from the kernel version string and parsed os-release fields.
    pub fn from_sources(kernel: &str, os_release: OsRelease) -> Self {
        let signature = std::iter::once(kernel.trim())
            .chain(os_release.display_values())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            signature,
            os_release,
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn os_release(&self) -> &OsRelease {
        &self.os_release
    }

    /// The distro family, preferring os-release over the full signature.
    pub fn family(&self) -> Option<DistroFamily> {
        self.os_release
            .identity_values()
            .find_map(match_family)
            .or_else(|| match_family(&self.signature))
    }
}

/// Match text against the known families, case-insensitively.
fn match_family(text: &str) -> Option<DistroFamily> {
    FAMILY_PATTERNS.iter().find_map(|(pattern, family)| {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .ok()?;
        re.is_match(text).then_some(*family)
    })
}

/// Read the distro signature from `uname -v` and the os-release file.
pub fn read_distro(
    runner: &dyn CommandRunner,
    os_release: &Path,
    timeout: Option<Duration>,
) -> LinuxDistro {
    let kernel = match runner.capture("uname", &["-v"], timeout) {
        Ok(result) if result.success => result.stdout,
        Ok(result) => {
            tracing::debug!("uname -v exited with {:?}", result.exit_code);
            String::new()
        }
        Err(e) => {
            tracing::debug!("uname -v unavailable: {}", e);
            String::new()
        }
    };

    let release = match read_os_release(os_release) {
        Ok(content) => OsRelease::parse(&content),
        Err(e) => {
            tracing::debug!("{:#}", e);
            OsRelease::default()
        }
    };

    let distro = LinuxDistro::from_sources(&kernel, release);
    tracing::debug!("Linux distro signature: {}", distro.signature());
    distro
}

fn read_os_release(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))
}
