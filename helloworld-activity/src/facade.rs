//! Launcher facade: turns the activity's actions into launch requests.
//!
//! Each operation builds exactly one [`LaunchRequest`] and submits it to the
//! [`BundleLauncher`]. The two "with document" operations first create a
//! placeholder text document in the [`DocumentStore`] and hand over its id.
//! Launching is fire-and-forget; only document creation can fail.

use crate::bundle_launcher::BundleLauncher;
use crate::document_store::DocumentStore;
use crate::environment::{HostEnvironment, HostServices};
use crate::error::ActivityError;
use helloworld_core::{ensure_dir_exists, DocumentRecord, LaunchRequest};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DOCUMENT_TITLE: &str = "Hello World";
pub const DOCUMENT_MIME_TYPE: &str = "text/plain";
/// Subdirectory of the activity root holding scratch files.
pub const SCRATCH_DIR_NAME: &str = "instance";

const PLACEHOLDER_LINE: &str = "Hello\nWorld!\n\n";
const PLACEHOLDER_REPEAT: usize = 10;

/// Content written into every created document.
pub fn placeholder_text() -> String {
    PLACEHOLDER_LINE.repeat(PLACEHOLDER_REPEAT)
}

pub struct LauncherFacade {
    launcher: Arc<dyn BundleLauncher>,
    store: Arc<dyn DocumentStore>,
    environment: Arc<dyn HostEnvironment>,
}

impl LauncherFacade {
    pub fn new(services: HostServices) -> Self {
        Self {
            launcher: services.launcher,
            store: services.store,
            environment: services.environment,
        }
    }

    /// Starts `bundle_id` without a document.
    pub fn launch_by_id(&self, bundle_id: &str) {
        self.submit(LaunchRequest::by_bundle_id(bundle_id));
    }

    /// Starts any bundle able to handle `mime_type`.
    pub fn launch_by_mime(&self, mime_type: &str) {
        self.submit(LaunchRequest::by_mime_type(mime_type));
    }

    /// Creates a text document and starts `bundle_id` with it.
    pub fn launch_by_id_with_document(&self, bundle_id: &str) -> Result<(), ActivityError> {
        let record = self.create_document()?;
        self.submit(LaunchRequest::by_bundle_id_with_document(bundle_id, record.id));
        Ok(())
    }

    /// Creates a text document and lets the host pick a bundle that opens it.
    pub fn launch_with_document(&self) -> Result<(), ActivityError> {
        let record = self.create_document()?;
        self.submit(LaunchRequest::with_document(record.id));
        Ok(())
    }

    fn submit(&self, request: LaunchRequest) {
        info!(%request, "Submitting launch request");
        self.launcher.launch(&request);
    }

    /// Creates, fills and commits a placeholder document.
    ///
    /// The scratch directory and file are prepared before the store is
    /// touched, so a filesystem failure never reaches the store. The scratch
    /// file is closed before `write`; if the store rejects the record the
    /// file is removed again.
    pub(crate) fn create_document(&self) -> Result<DocumentRecord, ActivityError> {
        let scratch_dir = self.scratch_dir()?;
        let scratch_path = write_scratch_file(&scratch_dir)?;

        let record = match self.store.create() {
            Ok(record) => record,
            Err(e) => {
                discard_scratch_file(&scratch_path);
                return Err(ActivityError::StoreCreateFailed(e));
            }
        };
        let record = record
            .with_title(DOCUMENT_TITLE)
            .with_mime_type(DOCUMENT_MIME_TYPE)
            .with_file_path(&scratch_path);

        if let Err(source) = self.store.write(&record) {
            discard_scratch_file(&scratch_path);
            return Err(ActivityError::StoreWriteFailed {
                id: record.id,
                source,
            });
        }
        info!(id = %record.id, "Created placeholder document");
        Ok(record)
    }

    fn scratch_dir(&self) -> Result<PathBuf, ActivityError> {
        let path = self.environment.activity_root().join(SCRATCH_DIR_NAME);
        ensure_dir_exists(&path).map_err(|source| ActivityError::ScratchDirectoryUnavailable {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Writes the placeholder text into a new uniquely named file in `dir` and
/// closes it. The file outlives this call.
fn write_scratch_file(dir: &Path) -> Result<PathBuf, ActivityError> {
    let temp_failed = |source: std::io::Error| ActivityError::TempFileCreationFailed {
        dir: dir.to_path_buf(),
        source,
    };

    let mut temp = tempfile::Builder::new()
        .prefix("tmp")
        .tempfile_in(dir)
        .map_err(temp_failed)?;
    temp.write_all(placeholder_text().as_bytes()).map_err(temp_failed)?;
    let (file, path) = temp.keep().map_err(|e| temp_failed(e.error))?;
    drop(file);

    debug!(path = %path.display(), "Scratch file written");
    Ok(path)
}

fn discard_scratch_file(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        // The store may already have taken the file.
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove scratch file");
        }
    }
}
