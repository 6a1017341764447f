//! Host-provided services injected into the activity.

use crate::bundle_launcher::{BundleLauncher, ProcessLauncher};
use crate::document_store::{DocumentStore, JournalStore};
use helloworld_core::utils::paths::get_app_data_dir;
use helloworld_core::{ActivityConfig, ActivitySettings, CoreError};
use std::path::PathBuf;
use std::sync::Arc;

/// Process-local facts the host supplies to an activity.
pub trait HostEnvironment: Send + Sync {
    /// Root directory for the activity's private files. Scratch files go in
    /// its `instance` subdirectory.
    fn activity_root(&self) -> PathBuf;
}

/// An environment with a fixed activity root.
#[derive(Debug, Clone)]
pub struct FixedEnvironment {
    root: PathBuf,
}

impl FixedEnvironment {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `settings.root` when configured, else `<app data dir>/<bundle_id>`.
    pub fn from_settings(settings: &ActivitySettings) -> Result<Self, CoreError> {
        match &settings.root {
            Some(root) => Ok(Self::new(root.clone())),
            None => Ok(Self::new(get_app_data_dir()?.join(&settings.bundle_id))),
        }
    }
}

impl HostEnvironment for FixedEnvironment {
    fn activity_root(&self) -> PathBuf {
        self.root.clone()
    }
}

/// The collaborators an activity is constructed with.
#[derive(Clone)]
pub struct HostServices {
    pub launcher: Arc<dyn BundleLauncher>,
    pub store: Arc<dyn DocumentStore>,
    pub environment: Arc<dyn HostEnvironment>,
}

impl HostServices {
    pub fn new(
        launcher: Arc<dyn BundleLauncher>,
        store: Arc<dyn DocumentStore>,
        environment: Arc<dyn HostEnvironment>,
    ) -> Self {
        Self {
            launcher,
            store,
            environment,
        }
    }

    /// Wires the local implementations: a [`JournalStore`], a
    /// [`ProcessLauncher`] over the configured bundles and a
    /// [`FixedEnvironment`].
    pub fn from_config(config: &ActivityConfig) -> Result<Self, CoreError> {
        let journal_root = match &config.journal.root {
            Some(root) => root.clone(),
            None => get_app_data_dir()?.join("datastore"),
        };
        let store: Arc<dyn DocumentStore> = Arc::new(JournalStore::open(journal_root)?);
        let launcher = ProcessLauncher::new(config.bundles.clone()).with_document_store(Arc::clone(&store));
        let environment = FixedEnvironment::from_settings(&config.activity)?;

        Ok(Self::new(Arc::new(launcher), store, Arc::new(environment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::{assert_impl_all, assert_obj_safe};
    use tempfile::TempDir;

    assert_obj_safe!(HostEnvironment);
    assert_impl_all!(HostServices: Clone, Send, Sync);

    #[test]
    fn fixed_environment_returns_its_root() {
        let env = FixedEnvironment::new("/srv/activity");
        assert_eq!(env.activity_root(), PathBuf::from("/srv/activity"));
    }

    #[test]
    fn configured_root_wins() {
        let settings = ActivitySettings {
            root: Some(PathBuf::from("/srv/hello")),
            ..ActivitySettings::default()
        };
        let env = FixedEnvironment::from_settings(&settings).unwrap();
        assert_eq!(env.activity_root(), PathBuf::from("/srv/hello"));
    }

    #[test]
    fn default_root_is_named_after_bundle() {
        if let Ok(env) = FixedEnvironment::from_settings(&ActivitySettings::default()) {
            assert!(env.activity_root().ends_with("org.laptop.HelloWorldActivity"));
        }
    }

    #[test]
    fn from_config_opens_journal_under_configured_root() {
        let temp = TempDir::new().unwrap();
        let mut config = ActivityConfig::default();
        config.journal.root = Some(temp.path().join("journal"));
        config.activity.root = Some(temp.path().join("activity"));

        let services = HostServices::from_config(&config).unwrap();
        assert!(temp.path().join("journal").is_dir());
        assert_eq!(services.environment.activity_root(), temp.path().join("activity"));

        let record = services.store.create().unwrap();
        assert!(!record.id.as_str().is_empty());
    }

    #[test]
    fn from_config_fails_when_journal_root_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("journal");
        std::fs::write(&blocker, "x").unwrap();
        let mut config = ActivityConfig::default();
        config.journal.root = Some(blocker);
        config.activity.root = Some(temp.path().join("activity"));

        assert!(HostServices::from_config(&config).is_err());
    }
}
