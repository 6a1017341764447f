//! Core data types shared between the activity and its host services.
//!
//! - **Documents**: [`DocumentId`] and [`DocumentRecord`] for entries in the document store.
//! - **Launching**: [`LaunchRequest`] and [`BundleSelector`] describing what to start.
//!
//! All types are serializable with Serde.

pub mod document;
pub mod launch;

pub use document::{DocumentId, DocumentRecord};
pub use launch::{BundleSelector, LaunchRequest};
