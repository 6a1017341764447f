//! Document identifiers and records handed between the activity and the document store.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque identifier of a document in the document store ("journal").
///
/// The store assigns it on creation; the activity only passes it along.
///
/// # Examples
///
/// ```
/// # use helloworld_core::types::DocumentId;
/// let id = DocumentId::new("6f0c2c47-2d1e-4f4b-9d1b-8f1c4e0a8d11").unwrap();
/// assert_eq!(id.as_str(), "6f0c2c47-2d1e-4f4b-9d1b-8f1c4e0a8d11");
/// assert!(DocumentId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new `DocumentId`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the value is empty or only whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "DocumentId cannot be empty.".to_string(),
            ));
        }
        Ok(DocumentId(value))
    }

    /// Allocates a fresh random identifier.
    pub fn generate() -> Self {
        DocumentId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

/// A document record as allocated by the document store.
///
/// `file_path` is `None` until the owner attaches backing content. After a
/// successful store write the path belongs to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub title: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

impl DocumentRecord {
    /// A record with empty metadata and no backing content.
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            title: String::new(),
            mime_type: String::new(),
            file_path: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}
