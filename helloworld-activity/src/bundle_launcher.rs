// helloworld-activity/src/bundle_launcher.rs
use crate::document_store::DocumentStore;
use helloworld_core::{BundleEntry, BundleSelector, DocumentId, LaunchRequest};
use std::process::Command;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Starts peer bundles. Fire-and-forget: the caller never learns whether the
/// peer came up.
pub trait BundleLauncher: Send + Sync {
    fn launch(&self, request: &LaunchRequest);
}

/// Why a launch did not happen. Only logged, never returned to the activity.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Bundle '{0}' is not installed")]
    BundleNotFound(String),
    #[error("No installed bundle handles '{0}'")]
    NoHandlerForMimeType(String),
    #[error("Cannot resolve a handler for document {id}: {reason}")]
    PayloadUnresolved { id: DocumentId, reason: String },
    #[error("Launch request has neither selector nor payload")]
    EmptyRequest,
    #[error("Failed to start bundle '{bundle_id}': {source}")]
    BundleLaunchFailed {
        bundle_id: String,
        #[source]
        source: std::io::Error,
    },
}

/// Launches bundles from a local registry by spawning their `exec` command.
///
/// Each started process gets `-b <bundle_id> -a <activity_id>` and, when a
/// document is handed over, `-o <object_id>`.
pub struct ProcessLauncher {
    bundles: Vec<BundleEntry>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl ProcessLauncher {
    pub fn new(bundles: Vec<BundleEntry>) -> Self {
        Self { bundles, store: None }
    }

    /// Lets payload-only requests be resolved through the document's MIME type.
    pub fn with_document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    fn find_by_id(&self, bundle_id: &str) -> Option<&BundleEntry> {
        self.bundles.iter().find(|b| b.id == bundle_id)
    }

    fn find_by_mime_type(&self, mime_type: &str) -> Option<&BundleEntry> {
        self.bundles.iter().find(|b| b.handles(mime_type))
    }

    /// Picks the bundle a request refers to.
    pub fn resolve(&self, request: &LaunchRequest) -> Result<&BundleEntry, LaunchError> {
        match (request.selector(), request.payload()) {
            (Some(BundleSelector::BundleId(id)), _) => {
                self.find_by_id(id).ok_or_else(|| LaunchError::BundleNotFound(id.clone()))
            }
            (Some(BundleSelector::MimeType(mime)), _) => self
                .find_by_mime_type(mime)
                .ok_or_else(|| LaunchError::NoHandlerForMimeType(mime.clone())),
            (None, Some(doc_id)) => {
                let store = self.store.as_ref().ok_or_else(|| LaunchError::PayloadUnresolved {
                    id: doc_id.clone(),
                    reason: "no document store attached".to_string(),
                })?;
                let record = store.get(doc_id).map_err(|e| LaunchError::PayloadUnresolved {
                    id: doc_id.clone(),
                    reason: e.to_string(),
                })?;
                self.find_by_mime_type(&record.mime_type)
                    .ok_or(LaunchError::NoHandlerForMimeType(record.mime_type))
            }
            (None, None) => Err(LaunchError::EmptyRequest),
        }
    }

    /// Builds the command that starts `entry` for `request`.
    pub fn command_for(&self, entry: &BundleEntry, request: &LaunchRequest, activity_id: &str) -> Command {
        // An empty exec line falls back to the bundle id and fails at spawn.
        let (program, args) = match entry.exec.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => (entry.id.as_str(), &[][..]),
        };
        let mut command = Command::new(program);
        command
            .args(args)
            .arg("-b")
            .arg(&entry.id)
            .arg("-a")
            .arg(activity_id);
        if let Some(doc_id) = request.payload() {
            command.arg("-o").arg(doc_id.as_str());
        }
        command
    }

    /// Resolves and spawns, returning the child's pid. The child is reaped on
    /// a detached thread and never waited on by the caller.
    pub fn try_launch(&self, request: &LaunchRequest) -> Result<u32, LaunchError> {
        let entry = self.resolve(request)?;
        let activity_id = uuid::Uuid::new_v4().simple().to_string();
        let mut command = self.command_for(entry, request, &activity_id);
        debug!(?command, "Spawning bundle");

        let mut child = command.spawn().map_err(|source| LaunchError::BundleLaunchFailed {
            bundle_id: entry.id.clone(),
            source,
        })?;
        let pid = child.id();
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        info!(bundle_id = %entry.id, %activity_id, pid, "Bundle started");
        Ok(pid)
    }
}

impl BundleLauncher for ProcessLauncher {
    fn launch(&self, request: &LaunchRequest) {
        info!(%request, "Launch requested");
        if let Err(e) = self.try_launch(request) {
            warn!(%request, error = %e, "Launch failed");
        }
    }
}
