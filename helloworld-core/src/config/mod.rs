//! Configuration Management.
//!
//! - [`types`]: the configuration schema ([`ActivityConfig`] and its sections).
//! - [`defaults`]: default values used when fields are missing.
//! - [`loader`]: [`ConfigLoader`], which finds, merges, parses and validates `config.toml`.
//!
//! ## Loading process
//!
//! 1. The system file (`/etc/helloworld-activity/config.toml`, or the path in
//!    `HELLOWORLD_SYSTEM_CONFIG_PATH`) and the user file (`<config dir>/config.toml`) are read.
//! 2. The user table is merged over the system table.
//! 3. The result is deserialized; if neither file exists the defaults are used.
//! 4. The configuration is validated and normalized.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{ActivityConfig, ActivitySettings, BundleEntry, JournalSettings, LoggingConfig};
