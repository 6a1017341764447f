//! # HelloWorld Activity (`helloworld-activity`)
//!
//! A minimal activity that starts other activities ("bundles") in four ways:
//! by bundle id, by MIME type, and either of those with a freshly created
//! text document handed over as payload.
//!
//! The host shell supplies three collaborators through [`HostServices`]:
//! a [`BundleLauncher`], a [`DocumentStore`] (the journal) and a
//! [`HostEnvironment`]. [`ProcessLauncher`], [`JournalStore`] and
//! [`FixedEnvironment`] are local implementations wired by
//! [`HostServices::from_config`].
//!
//! ```rust,ignore
//! use helloworld_activity::{Activity, ActivityAction, ActivityHandle, HelloWorldActivity, HostServices};
//! use helloworld_core::ConfigLoader;
//!
//! let config = ConfigLoader::load()?;
//! let services = HostServices::from_config(&config)?;
//! let handle = ActivityHandle::new(config.activity.bundle_id.clone());
//! let activity = HelloWorldActivity::initialize(handle, config.activity.clone(), services)?;
//! activity.trigger(ActivityAction::LaunchWithDocument)?;
//! ```

pub mod activity;
pub mod bundle_launcher;
pub mod document_store;
pub mod environment;
pub mod error;
pub mod facade;

pub use activity::{Activity, ActivityAction, ActivityHandle, HelloWorldActivity};
pub use bundle_launcher::{BundleLauncher, LaunchError, ProcessLauncher};
pub use document_store::{DocumentStore, JournalStore, StoreError};
pub use environment::{FixedEnvironment, HostEnvironment, HostServices};
pub use error::ActivityError;
pub use facade::{placeholder_text, LauncherFacade, DOCUMENT_MIME_TYPE, DOCUMENT_TITLE, SCRATCH_DIR_NAME};
