//! Default configuration values.
//!
//! Used by `serde`'s `default` attribute in the configuration structures.
//! The launch targets match the peers the activity was written against.

use crate::config::{ActivitySettings, JournalSettings, LoggingConfig};
use std::path::PathBuf;

pub(super) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(super) fn default_log_format() -> String {
    "text".to_string()
}

pub(super) fn default_activity_settings() -> ActivitySettings {
    ActivitySettings {
        bundle_id: default_bundle_id(),
        root: None,
        max_participants: default_max_participants(),
        peer_bundle_id: default_peer_bundle_id(),
        document_peer_bundle_id: default_document_peer_bundle_id(),
        mime_type: default_mime_type(),
    }
}

pub(super) fn default_bundle_id() -> String {
    "org.laptop.HelloWorldActivity".to_string()
}

/// No collaboration: the share button stays insensitive.
pub(super) fn default_max_participants() -> u32 {
    1
}

pub(super) fn default_peer_bundle_id() -> String {
    "org.laptop.TurtleArtActivity".to_string()
}

pub(super) fn default_document_peer_bundle_id() -> String {
    "org.laptop.AbiWordActivity".to_string()
}

pub(super) fn default_mime_type() -> String {
    "audio/x-vorbis+ogg".to_string()
}

pub(super) fn default_journal_settings() -> JournalSettings {
    JournalSettings { root: None }
}
