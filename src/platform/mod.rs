//! Platform and Linux distribution detection.
//!
//! # Modules
//!
//! - [`detection`] - Operating system identification
//! - [`distro`] - Linux distro signatures and package manager selection

pub mod detection;
pub mod distro;

pub use detection::{Platform, PlatformDetector, PlatformId};
pub use distro::{DistroFamily, LinuxDistro, LinuxPackageManager, OsRelease};
