//! Launch requests submitted to a bundle launcher.

use super::document::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the bundle launcher should pick the application to start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleSelector {
    /// A specific bundle, e.g. `org.laptop.TurtleArtActivity`.
    BundleId(String),
    /// Any bundle able to handle this MIME type.
    MimeType(String),
}

impl fmt::Display for BundleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleSelector::BundleId(id) => write!(f, "bundle '{}'", id),
            BundleSelector::MimeType(mime) => write!(f, "handler for '{}'", mime),
        }
    }
}

/// Parameters of a single launch attempt.
///
/// A request always carries a selector, a payload, or both.
///
/// ```
/// # use helloworld_core::types::{BundleSelector, DocumentId, LaunchRequest};
/// let doc = DocumentId::new("journal-entry-1").unwrap();
/// let request = LaunchRequest::with_document(doc.clone());
/// assert_eq!(request.selector(), None);
/// assert_eq!(request.payload(), Some(&doc));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LaunchRequest {
    selector: Option<BundleSelector>,
    payload: Option<DocumentId>,
}

impl LaunchRequest {
    /// Start a bundle by identifier, without a document.
    pub fn by_bundle_id(bundle_id: impl Into<String>) -> Self {
        Self {
            selector: Some(BundleSelector::BundleId(bundle_id.into())),
            payload: None,
        }
    }

    /// Start any bundle able to handle `mime_type`, without a document.
    pub fn by_mime_type(mime_type: impl Into<String>) -> Self {
        Self {
            selector: Some(BundleSelector::MimeType(mime_type.into())),
            payload: None,
        }
    }

    /// Start a bundle by identifier and hand it a document.
    pub fn by_bundle_id_with_document(bundle_id: impl Into<String>, document: DocumentId) -> Self {
        Self {
            selector: Some(BundleSelector::BundleId(bundle_id.into())),
            payload: Some(document),
        }
    }

    /// Hand a document to whichever bundle can open its MIME type.
    pub fn with_document(document: DocumentId) -> Self {
        Self {
            selector: None,
            payload: Some(document),
        }
    }

    pub fn selector(&self) -> Option<&BundleSelector> {
        self.selector.as_ref()
    }

    pub fn payload(&self) -> Option<&DocumentId> {
        self.payload.as_ref()
    }

    /// The bundle identifier, when selecting by identifier.
    pub fn bundle_id(&self) -> Option<&str> {
        match &self.selector {
            Some(BundleSelector::BundleId(id)) => Some(id.as_str()),
            _ => None,
        }
    }

    /// The MIME type, when selecting by capability.
    pub fn mime_type(&self) -> Option<&str> {
        match &self.selector {
            Some(BundleSelector::MimeType(mime)) => Some(mime.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for LaunchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.selector, &self.payload) {
            (Some(selector), Some(doc)) => write!(f, "{} with document {}", selector, doc),
            (Some(selector), None) => write!(f, "{}", selector),
            (None, Some(doc)) => write!(f, "handler for document {}", doc),
            (None, None) => f.write_str("empty launch request"),
        }
    }
}
