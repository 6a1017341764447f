//! Configuration Loading.
//!
//! [`ConfigLoader`] reads the system-wide and per-user `config.toml`, merges
//! the user table over the system table, deserializes the result into an
//! [`ActivityConfig`] and validates it. Missing or empty files contribute
//! nothing; if neither exists the defaults are used.
//!
//! ```rust,ignore
//! use helloworld_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("Peer bundle: {}", config.activity.peer_bundle_id),
//!     Err(e) => {
//!         helloworld_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration loading failed: {}", e);
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use toml::Value;

use crate::config::ActivityConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as hw_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir, get_system_config_path_with_override};

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` if a directory cannot be resolved, a file exists
    /// but cannot be read or parsed, or validation fails.
    pub fn load() -> Result<ActivityConfig, CoreError> {
        let system_config_path = get_system_config_path_with_override()?;
        let user_config_path = get_app_config_dir()?.join("config.toml");
        Self::load_from_paths(Some(&system_config_path), &user_config_path)
    }

    /// Same as [`ConfigLoader::load`] with explicit file locations.
    pub fn load_from_paths(system: Option<&Path>, user: &Path) -> Result<ActivityConfig, CoreError> {
        let system_toml_value = match system {
            Some(path) => Self::read_toml(path)?,
            None => None,
        };
        let user_toml_value = Self::read_toml(user)?;

        let merged_toml = Self::merge_toml_values(system_toml_value, user_toml_value);

        let mut final_config: ActivityConfig = match merged_toml {
            Some(value) => value
                .try_into::<ActivityConfig>()
                .map_err(ConfigError::ParseError)?,
            None => ActivityConfig::default(),
        };

        Self::validate_config(&mut final_config)?;
        Ok(final_config)
    }

    /// Parses a single TOML document into a validated configuration.
    pub fn load_from_str(content: &str) -> Result<ActivityConfig, CoreError> {
        let mut config: ActivityConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    fn read_toml(path: &Path) -> Result<Option<Value>, CoreError> {
        match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content.parse::<Value>().map_err(ConfigError::ParseError)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }
            .into()),
        }
    }

    /// Merges two optional TOML values. `override_val` takes precedence.
    fn merge_toml_values(base: Option<Value>, override_val: Option<Value>) -> Option<Value> {
        match (base, override_val) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(Value::Table(mut base_table)), Some(Value::Table(override_table))) => {
                Self::merge_toml_tables(&mut base_table, &override_table);
                Some(Value::Table(base_table))
            }
            (_, Some(o)) => Some(o),
        }
    }

    /// Recursively merges `override_table` into `base_table`. Arrays (such as
    /// `bundles`) are replaced, not concatenated.
    fn merge_toml_tables(base_table: &mut toml::map::Map<String, Value>, override_table: &toml::map::Map<String, Value>) {
        for (key, override_item) in override_table {
            match base_table.get_mut(key) {
                Some(base_item) => {
                    if let (Value::Table(bt), Value::Table(ot)) = (&mut *base_item, override_item) {
                        Self::merge_toml_tables(bt, ot);
                    } else {
                        *base_item = override_item.clone();
                    }
                }
                None => {
                    base_table.insert(key.clone(), override_item.clone());
                }
            }
        }
    }

    /// Normalizes and validates a parsed configuration.
    ///
    /// - log level and format are lowercased and checked;
    /// - a relative log file path is made absolute against the app state directory
    ///   and its parent is created;
    /// - `max_participants` must be at least 1;
    /// - launch targets must be non-empty;
    /// - bundle entries need a unique, non-empty id and a non-empty `exec`.
    fn validate_config(config: &mut ActivityConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                config.logging.level = level_lower;
            }
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))
                .into());
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => {
                config.logging.format = format_lower;
            }
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))
                .into());
            }
        }

        if let Some(log_path) = &config.logging.file_path {
            let absolute_path = if log_path.is_absolute() {
                log_path.clone()
            } else {
                get_app_state_dir()?.join(log_path)
            };
            if let Some(parent_dir) = absolute_path.parent() {
                if !parent_dir.as_os_str().is_empty() {
                    hw_fs::ensure_dir_exists(parent_dir)?;
                }
            }
            config.logging.file_path = Some(absolute_path);
        }

        let activity = &config.activity;
        if activity.max_participants == 0 {
            return Err(ConfigError::ValidationError(
                "activity.max_participants must be at least 1.".to_string(),
            )
            .into());
        }
        for (field, value) in [
            ("activity.bundle_id", &activity.bundle_id),
            ("activity.peer_bundle_id", &activity.peer_bundle_id),
            ("activity.document_peer_bundle_id", &activity.document_peer_bundle_id),
            ("activity.mime_type", &activity.mime_type),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{} must not be empty.", field)).into());
            }
        }

        let mut seen = HashSet::new();
        for entry in &config.bundles {
            if entry.id.trim().is_empty() {
                return Err(ConfigError::ValidationError("Bundle entry with empty id.".to_string()).into());
            }
            if entry.exec.is_empty() || entry.exec[0].trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Bundle '{}' has no exec command.",
                    entry.id
                ))
                .into());
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Bundle '{}' is listed more than once.",
                    entry.id
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).expect("Failed to write temp config file");
        path
    }

    #[test]
    fn missing_files_yield_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigLoader::load_from_paths(
            Some(&temp.path().join("system.toml")),
            &temp.path().join("user.toml"),
        )
        .unwrap();
        assert_eq!(config, ActivityConfig::default());
    }

    #[test]
    fn empty_user_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        let user = write_file(temp.path(), "user.toml", "   \n");
        let config = ConfigLoader::load_from_paths(None, &user).unwrap();
        assert_eq!(config.activity.document_peer_bundle_id, "org.laptop.AbiWordActivity");
    }

    #[test]
    fn user_values_override_system_values() {
        let temp = TempDir::new().unwrap();
        let system = write_file(
            temp.path(),
            "system.toml",
            r#"
            [logging]
            level = "debug"
            format = "json"

            [activity]
            peer_bundle_id = "org.example.System"
            mime_type = "audio/ogg"
            "#,
        );
        let user = write_file(
            temp.path(),
            "user.toml",
            r#"
            [logging]
            level = "WARN"

            [activity]
            peer_bundle_id = "org.example.User"
            "#,
        );

        let config = ConfigLoader::load_from_paths(Some(&system), &user).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.activity.peer_bundle_id, "org.example.User");
        assert_eq!(config.activity.mime_type, "audio/ogg");
    }

    #[test]
    fn user_bundles_replace_system_bundles() {
        let temp = TempDir::new().unwrap();
        let system = write_file(
            temp.path(),
            "system.toml",
            r#"
            [[bundles]]
            id = "org.example.A"
            exec = ["a"]
            [[bundles]]
            id = "org.example.B"
            exec = ["b"]
            "#,
        );
        let user = write_file(
            temp.path(),
            "user.toml",
            r#"
            [[bundles]]
            id = "org.example.C"
            exec = ["c", "--fast"]
            mime_types = ["text/plain"]
            "#,
        );

        let config = ConfigLoader::load_from_paths(Some(&system), &user).unwrap();
        assert_eq!(config.bundles.len(), 1);
        assert_eq!(config.bundles[0].id, "org.example.C");
        assert_eq!(config.bundles[0].exec, vec!["c".to_string(), "--fast".to_string()]);
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let result = ConfigLoader::load_from_str("[activity]\ncolour = \"blue\"\n");
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let user = write_file(temp.path(), "user.toml", "this is not toml");
        let result = ConfigLoader::load_from_paths(None, &user);
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        // A directory cannot be read as a file.
        let temp = TempDir::new().unwrap();
        let result = ConfigLoader::load_from_paths(None, temp.path());
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ReadError { .. }))));
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        match ConfigLoader::load_from_str("[logging]\nlevel = \"loud\"\n") {
            Err(CoreError::Config(ConfigError::ValidationError(msg))) => {
                assert!(msg.contains("Invalid log level: 'loud'"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn invalid_log_format_is_rejected() {
        let result = ConfigLoader::load_from_str("[logging]\nformat = \"xml\"\n");
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ValidationError(_)))));
    }

    #[test]
    fn absolute_log_path_gets_parent_created() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("logs").join("activity.log");
        let content = format!("[logging]\nfile_path = {:?}\n", log_path.to_string_lossy());

        let config = ConfigLoader::load_from_str(&content).unwrap();
        assert_eq!(config.logging.file_path, Some(log_path.clone()));
        assert!(log_path.parent().unwrap().is_dir());
    }

    #[test]
    fn zero_participants_is_rejected() {
        let result = ConfigLoader::load_from_str("[activity]\nmax_participants = 0\n");
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ValidationError(_)))));
    }

    #[test]
    fn empty_launch_target_is_rejected() {
        match ConfigLoader::load_from_str("[activity]\nmime_type = \"\"\n") {
            Err(CoreError::Config(ConfigError::ValidationError(msg))) => {
                assert_eq!(msg, "activity.mime_type must not be empty.");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn bundle_without_exec_is_rejected() {
        let result = ConfigLoader::load_from_str("[[bundles]]\nid = \"org.example.A\"\nexec = []\n");
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ValidationError(_)))));
    }

    #[test]
    fn duplicate_bundles_are_rejected() {
        let content = r#"
            [[bundles]]
            id = "org.example.A"
            exec = ["a"]
            [[bundles]]
            id = "org.example.A"
            exec = ["b"]
        "#;
        match ConfigLoader::load_from_str(content) {
            Err(CoreError::Config(ConfigError::ValidationError(msg))) => {
                assert_eq!(msg, "Bundle 'org.example.A' is listed more than once.");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
