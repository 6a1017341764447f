//! Configuration Data Structures.
//!
//! - [`ActivityConfig`]: the root structure.
//! - [`LoggingConfig`]: the logging subsystem.
//! - [`ActivitySettings`]: identity and launch targets of the activity.
//! - [`JournalSettings`]: the local document store.
//! - [`BundleEntry`]: one entry of the local bundle registry.
//!
//! Missing fields take their values from [`super::defaults`]; unknown fields
//! are rejected via `#[serde(deny_unknown_fields)]`.

use super::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// ```
/// use helloworld_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/helloworld.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/helloworld.log")));
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of "trace", "debug", "info", "warn", "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the application's state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Identity of the activity and the peers its actions launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivitySettings {
    #[serde(default = "defaults::default_bundle_id")]
    pub bundle_id: String,
    /// Overrides the activity root. Defaults to `<app data dir>/<bundle_id>`.
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default = "defaults::default_max_participants")]
    pub max_participants: u32,
    /// Bundle started by the plain "launch peer" action.
    #[serde(default = "defaults::default_peer_bundle_id")]
    pub peer_bundle_id: String,
    /// Bundle that receives the newly created text document.
    #[serde(default = "defaults::default_document_peer_bundle_id")]
    pub document_peer_bundle_id: String,
    /// MIME type used by the "launch by capability" action.
    #[serde(default = "defaults::default_mime_type")]
    pub mime_type: String,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        defaults::default_activity_settings()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JournalSettings {
    /// Store directory. Defaults to `<app data dir>/datastore`.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// An installed bundle known to the local launcher.
///
/// ```
/// use helloworld_core::config::BundleEntry;
///
/// let entry: BundleEntry = toml::from_str(r#"
/// id = "org.laptop.AbiWordActivity"
/// exec = ["abiword-activity"]
/// mime_types = ["text/plain", "application/rtf"]
/// "#).unwrap();
/// assert!(entry.handles("text/plain"));
/// assert!(!entry.handles("audio/x-vorbis+ogg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleEntry {
    pub id: String,
    /// Program and leading arguments.
    pub exec: Vec<String>,
    #[serde(default)]
    pub mime_types: Vec<String>,
}

impl BundleEntry {
    /// Whether this bundle declares `mime_type` (case-insensitive).
    pub fn handles(&self, mime_type: &str) -> bool {
        self.mime_types.iter().any(|m| m.eq_ignore_ascii_case(mime_type))
    }
}

/// Root configuration structure.
///
/// ```
/// use helloworld_core::config::ActivityConfig;
///
/// let toml_str = r#"
/// [logging]
/// level = "warn"
///
/// [activity]
/// mime_type = "text/html"
///
/// [[bundles]]
/// id = "org.laptop.TurtleArtActivity"
/// exec = ["turtleart"]
/// "#;
/// let config: ActivityConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(config.logging.level, "warn");
/// assert_eq!(config.activity.mime_type, "text/html");
/// assert_eq!(config.activity.peer_bundle_id, "org.laptop.TurtleArtActivity");
/// assert_eq!(config.bundles.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_activity_settings")]
    pub activity: ActivitySettings,
    #[serde(default = "defaults::default_journal_settings")]
    pub journal: JournalSettings,
    #[serde(default)]
    pub bundles: Vec<BundleEntry>,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            activity: ActivitySettings::default(),
            journal: JournalSettings::default(),
            bundles: Vec::new(),
        }
    }
}
