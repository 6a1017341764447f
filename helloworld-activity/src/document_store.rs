//! The document store ("journal") collaborator and a directory-backed implementation.
use chrono::{DateTime, Utc};
use helloworld_core::{ensure_dir_exists, move_file, read_to_string, CoreError, DocumentId, DocumentRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid document record {id}: {reason}")]
    InvalidRecord { id: DocumentId, reason: String },
    #[error("Document {0} not found")]
    NotFound(DocumentId),
    #[error("Document store storage error: {0}")]
    Storage(#[from] CoreError),
    #[error("Malformed metadata for document {id}")]
    Metadata {
        id: DocumentId,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage for user documents shared between activities.
pub trait DocumentStore: Send + Sync {
    /// Allocates an identifier and an empty metadata mapping.
    fn create(&self) -> Result<DocumentRecord, StoreError>;

    /// Commits the record's metadata and takes ownership of its backing file.
    ///
    /// On failure the caller's file stays where it was and no partial entry
    /// remains.
    fn write(&self, record: &DocumentRecord) -> Result<(), StoreError>;

    /// Reads back a committed record. Launchers use this to find the MIME
    /// type of a payload.
    fn get(&self, id: &DocumentId) -> Result<DocumentRecord, StoreError>;
}

const METADATA_FILE: &str = "metadata.json";
const DATA_FILE: &str = "data";
const METADATA_STAGING_FILE: &str = "metadata.json.tmp";
const DATA_STAGING_FILE: &str = "data.tmp";

/// On-disk metadata of one journal entry.
#[derive(Debug, Serialize, Deserialize)]
struct StoredMetadata {
    id: DocumentId,
    title: String,
    mime_type: String,
    timestamp: DateTime<Utc>,
}

/// A document store keeping one directory per entry:
/// `<root>/<id>/metadata.json` and `<root>/<id>/data`.
pub struct JournalStore {
    root: PathBuf,
    allocated: Mutex<HashSet<DocumentId>>,
}

impl JournalStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        ensure_dir_exists(&root)?;
        info!(root = %root.display(), "Journal store opened");
        Ok(Self {
            root,
            allocated: Mutex::new(HashSet::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_dir(&self, id: &DocumentId) -> PathBuf {
        self.root.join(id.as_str())
    }

    fn is_committed(&self, id: &DocumentId) -> bool {
        self.entry_dir(id).join(METADATA_FILE).is_file()
    }

    fn validate(&self, record: &DocumentRecord) -> Result<PathBuf, StoreError> {
        let invalid = |reason: String| StoreError::InvalidRecord {
            id: record.id.clone(),
            reason,
        };

        // Ids are joined onto the store root.
        if record.id.as_str().contains(['/', '\\']) || record.id.as_str().starts_with('.') {
            return Err(invalid("identifier is not a plain name".to_string()));
        }
        let known = self
            .allocated
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&record.id);
        if !known && !self.is_committed(&record.id) {
            return Err(invalid("identifier was not allocated by this store".to_string()));
        }
        let path = record
            .file_path()
            .ok_or_else(|| invalid("no backing file".to_string()))?;
        if !path.is_file() {
            return Err(invalid(format!("backing file {:?} is not a regular file", path)));
        }
        Ok(path.to_path_buf())
    }

    /// Stages metadata and data inside the entry directory, then renames them
    /// into place. On failure the caller's file is moved back and an entry
    /// directory created by this call is removed.
    fn commit(&self, record: &DocumentRecord) -> Result<(), StoreError> {
        let source_path = self.validate(record)?;

        let entry_dir = self.entry_dir(&record.id);
        let created_entry = !entry_dir.exists();
        ensure_dir_exists(&entry_dir)?;

        let metadata_staging = entry_dir.join(METADATA_STAGING_FILE);
        let data_staging = entry_dir.join(DATA_STAGING_FILE);
        let result = stage_and_rename(record, &source_path, &entry_dir, &metadata_staging, &data_staging);

        if let Err(e) = &result {
            warn!(id = %record.id, error = %e, "Journal write failed, rolling back");
            if data_staging.exists() {
                if let Err(restore_err) = move_file(&data_staging, &source_path) {
                    warn!(path = %source_path.display(), error = %restore_err, "Failed to restore backing file");
                }
            }
            let _ = fs::remove_file(&metadata_staging);
            if created_entry {
                if let Err(cleanup_err) = fs::remove_dir_all(&entry_dir) {
                    warn!(path = %entry_dir.display(), error = %cleanup_err, "Failed to remove journal entry");
                }
            }
        }
        result?;

        info!(id = %record.id, title = %record.title, mime_type = %record.mime_type, "Journal entry written");
        Ok(())
    }
}

fn stage_and_rename(
    record: &DocumentRecord,
    source_path: &Path,
    entry_dir: &Path,
    metadata_staging: &Path,
    data_staging: &Path,
) -> Result<(), StoreError> {
    let metadata = StoredMetadata {
        id: record.id.clone(),
        title: record.title.clone(),
        mime_type: record.mime_type.clone(),
        timestamp: Utc::now(),
    };
    let json = serde_json::to_vec_pretty(&metadata).map_err(|source| StoreError::Metadata {
        id: record.id.clone(),
        source,
    })?;
    fs::write(metadata_staging, json).map_err(|source| CoreError::Filesystem {
        message: "Failed to stage journal metadata".to_string(),
        path: metadata_staging.to_path_buf(),
        source,
    })?;

    move_file(source_path, data_staging)?;
    // Metadata first: an entry is committed once `metadata.json` exists.
    rename_into_place(metadata_staging, &entry_dir.join(METADATA_FILE))?;
    rename_into_place(data_staging, &entry_dir.join(DATA_FILE))?;
    Ok(())
}

fn rename_into_place(from: &Path, to: &Path) -> Result<(), CoreError> {
    fs::rename(from, to).map_err(|source| CoreError::Filesystem {
        message: "Failed to commit journal file".to_string(),
        path: to.to_path_buf(),
        source,
    })
}

impl DocumentStore for JournalStore {
    fn create(&self) -> Result<DocumentRecord, StoreError> {
        let id = DocumentId::generate();
        self.allocated
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id.clone());
        debug!(%id, "Allocated journal entry");
        Ok(DocumentRecord::new(id))
    }

    fn write(&self, record: &DocumentRecord) -> Result<(), StoreError> {
        let result = self.commit(record);
        // Successful or not, the allocation is used up.
        self.allocated
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&record.id);
        result
    }

    fn get(&self, id: &DocumentId) -> Result<DocumentRecord, StoreError> {
        if !self.is_committed(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        let entry_dir = self.entry_dir(id);
        let content = read_to_string(&entry_dir.join(METADATA_FILE))?;
        let metadata: StoredMetadata = serde_json::from_str(&content).map_err(|source| StoreError::Metadata {
            id: id.clone(),
            source,
        })?;
        Ok(DocumentRecord::new(metadata.id)
            .with_title(metadata.title)
            .with_mime_type(metadata.mime_type)
            .with_file_path(entry_dir.join(DATA_FILE)))
    }
}
