//! Configuration loading and validation.
//!
//! # Modules
//!
//! - [`schema`] - Configuration types and defaults
//! - [`loader`] - Config file discovery and parsing

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_file, user_config_path};
pub use schema::{
    SudoMode, ToolstrapConfig, DEFAULT_NVM_VERSION, DEFAULT_PROBE_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
};
