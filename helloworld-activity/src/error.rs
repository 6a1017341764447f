use crate::document_store::StoreError;
use helloworld_core::{CoreError, DocumentId};
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to the caller of an activity action.
///
/// Launch outcomes are not part of this enum: launching is fire-and-forget
/// and its failures stay inside the bundle launcher.
#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("Scratch directory {path:?} is unavailable")]
    ScratchDirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
    #[error("Failed to create temporary file in {dir:?}")]
    TempFileCreationFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Document store could not allocate a record")]
    StoreCreateFailed(#[source] StoreError),
    #[error("Document store rejected record {id}")]
    StoreWriteFailed {
        id: DocumentId,
        #[source]
        source: StoreError,
    },
    #[error(transparent)]
    Core(#[from] CoreError),
}
