//! Tool detection and installation.
//!
//! # Modules
//!
//! - [`tools`] - The managed tools and their version queries
//! - [`status`] - Probe outcome types
//! - [`probe`] - Availability probing
//! - [`installer`] - Install plans and their execution

pub mod installer;
pub mod probe;
pub mod status;
pub mod tools;

pub use installer::{
    plan_install, InstallOutcome, InstallPlan, InstallSettings, InstallStep, Installer,
    Prerequisite, ToolInstaller,
};
pub use probe::Prober;
pub use status::{AbsenceReason, ProbeOutcome};
pub use tools::{Tool, ToolCheck};
