//! # HelloWorld Core Library (`helloworld-core`)
//!
//! Foundational layer of the HelloWorld activity, shared by the activity
//! itself and by the local host services that stand in for the desktop shell.
//!
//! - **Error Handling**: [`CoreError`] and the specific [`ConfigError`] and [`LoggingError`].
//! - **Data Types**: [`DocumentId`], [`DocumentRecord`], [`LaunchRequest`] and [`BundleSelector`].
//! - **Configuration**: [`ActivityConfig`] loaded by [`ConfigLoader`] from layered TOML files.
//! - **Logging**: `tracing`-based setup via [`init_logging`] and [`init_minimal_logging`].
//! - **Utilities**: directory creation, file moves and XDG path resolution.
//!
//! ```rust,ignore
//! use helloworld_core::{init_logging, ConfigLoader, CoreError};
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     init_logging(&config.logging, false)?;
//!     tracing::info!(bundle_id = %config.activity.bundle_id, "Core initialized");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{ActivityConfig, ActivitySettings, BundleEntry, ConfigLoader, JournalSettings, LoggingConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::{BundleSelector, DocumentId, DocumentRecord, LaunchRequest};
pub use utils::{ensure_dir_exists, move_file, read_to_string};
