//! XDG Base Directory and Application-Specific Path Resolution.
//!
//! Thin wrappers over `directories-next` that return [`CoreError`] when a
//! directory cannot be determined (e.g. no HOME directory).
//!
//! - [`get_app_config_dir()`]: e.g. `~/.config/helloworld-activity`.
//! - [`get_app_data_dir()`]: e.g. `~/.local/share/helloworld-activity`.
//! - [`get_app_state_dir()`]: e.g. `~/.local/state/HelloWorld/helloworld-activity`.
//! - [`get_system_config_path_with_override()`]: the system-wide config file.

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "HelloWorld";
const APPLICATION: &str = "helloworld-activity";

/// Environment variable overriding the system configuration file location.
pub const SYSTEM_CONFIG_PATH_ENV: &str = "HELLOWORLD_SYSTEM_CONFIG_PATH";
const DEFAULT_SYSTEM_CONFIG_PATH: &str = "/etc/helloworld-activity/config.toml";

fn project_dirs(dir_type: &str) -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: dir_type.to_string(),
        })
    })
}

/// Returns the application-specific configuration directory.
///
/// # Errors
/// Returns [`CoreError::Config(ConfigError::DirectoryUnavailable)`] if the
/// directory cannot be determined.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Config").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the application-specific data directory. Activity roots and the
/// local document store live below it unless configured otherwise.
pub fn get_app_data_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Data").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Returns the base directory for user-specific state files.
///
/// `$XDG_STATE_HOME` on Linux, falling back to `$HOME/.local/state`. Other
/// platforms use the local data directory.
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "State Base".to_string(),
            })
        })
}

/// Returns the application-specific state directory (log files go here).
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    get_state_base_dir().map(|base| base.join(ORGANIZATION).join(APPLICATION))
}

/// Returns the path of the system-wide configuration file.
///
/// [`SYSTEM_CONFIG_PATH_ENV`] takes precedence when set to a non-empty value.
pub fn get_system_config_path_with_override() -> Result<PathBuf, ConfigError> {
    match std::env::var(SYSTEM_CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(PathBuf::from(DEFAULT_SYSTEM_CONFIG_PATH)),
    }
}
