//! The activity surface the host shell instantiates and drives.

use crate::environment::HostServices;
use crate::error::ActivityError;
use crate::facade::LauncherFacade;
use helloworld_core::{ActivitySettings, CoreError, DocumentId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// What the host passes to a starting activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHandle {
    pub activity_id: String,
    pub bundle_id: String,
    /// Journal entry the activity was resumed from, if any.
    #[serde(default)]
    pub object_id: Option<DocumentId>,
}

impl ActivityHandle {
    /// A handle for a fresh instance of `bundle_id` with a new activity id.
    pub fn new(bundle_id: impl Into<String>) -> Self {
        Self {
            activity_id: uuid::Uuid::new_v4().simple().to_string(),
            bundle_id: bundle_id.into(),
            object_id: None,
        }
    }

    pub fn with_object_id(mut self, object_id: DocumentId) -> Self {
        self.object_id = Some(object_id);
        self
    }
}

/// The four buttons of the activity, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// Start the peer bundle by id.
    LaunchPeer,
    /// Start any bundle handling the configured MIME type.
    LaunchByMimeType,
    /// Create a text document and start the document peer with it.
    LaunchPeerWithDocument,
    /// Create a text document and start whatever can open it.
    LaunchWithDocument,
}

impl ActivityAction {
    pub const ALL: [ActivityAction; 4] = [
        ActivityAction::LaunchPeer,
        ActivityAction::LaunchByMimeType,
        ActivityAction::LaunchPeerWithDocument,
        ActivityAction::LaunchWithDocument,
    ];

    /// Button label. The MIME type action names the configured type.
    pub fn label(&self, settings: &ActivitySettings) -> String {
        match self {
            ActivityAction::LaunchPeer => "Start TurtleBlocks Activity".to_string(),
            ActivityAction::LaunchByMimeType => {
                format!("Start activity that can handle the type '{}'", settings.mime_type)
            }
            ActivityAction::LaunchPeerWithDocument => "Start Write Activity with a text object".to_string(),
            ActivityAction::LaunchWithDocument => "Start activity that can handle a text object".to_string(),
        }
    }

    /// Whether triggering creates a journal entry.
    pub fn creates_document(&self) -> bool {
        matches!(
            self,
            ActivityAction::LaunchPeerWithDocument | ActivityAction::LaunchWithDocument
        )
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityAction::LaunchPeer => "launch_peer",
            ActivityAction::LaunchByMimeType => "launch_by_mime_type",
            ActivityAction::LaunchPeerWithDocument => "launch_peer_with_document",
            ActivityAction::LaunchWithDocument => "launch_with_document",
        };
        f.write_str(name)
    }
}

/// Capabilities every activity offers the host.
pub trait Activity: Sized {
    /// Builds the activity for `handle` with injected host services.
    fn initialize(handle: ActivityHandle, settings: ActivitySettings, services: HostServices) -> Result<Self, ActivityError>;

    fn handle(&self) -> &ActivityHandle;

    /// Actions the host should expose, in display order.
    fn actions(&self) -> &'static [ActivityAction];

    /// Runs one action to completion.
    fn trigger(&self, action: ActivityAction) -> Result<(), ActivityError>;
}

pub struct HelloWorldActivity {
    handle: ActivityHandle,
    settings: ActivitySettings,
    facade: LauncherFacade,
}

impl HelloWorldActivity {
    /// Collaboration limit. At 1 the host keeps the share control insensitive.
    pub fn max_participants(&self) -> u32 {
        self.settings.max_participants
    }

    pub fn is_shareable(&self) -> bool {
        self.settings.max_participants > 1
    }

    pub fn settings(&self) -> &ActivitySettings {
        &self.settings
    }

    /// `(action, label)` pairs for building the button column.
    pub fn action_labels(&self) -> Vec<(ActivityAction, String)> {
        self.actions()
            .iter()
            .map(|action| (*action, action.label(&self.settings)))
            .collect()
    }
}

impl Activity for HelloWorldActivity {
    fn initialize(handle: ActivityHandle, settings: ActivitySettings, services: HostServices) -> Result<Self, ActivityError> {
        if handle.activity_id.trim().is_empty() {
            return Err(CoreError::InvalidInput("Activity id cannot be empty.".to_string()).into());
        }
        if handle.bundle_id.trim().is_empty() {
            return Err(CoreError::InvalidInput("Bundle id cannot be empty.".to_string()).into());
        }
        info!(
            activity_id = %handle.activity_id,
            bundle_id = %handle.bundle_id,
            object_id = ?handle.object_id,
            max_participants = settings.max_participants,
            "HelloWorld activity initialized"
        );
        Ok(Self {
            handle,
            settings,
            facade: LauncherFacade::new(services),
        })
    }

    fn handle(&self) -> &ActivityHandle {
        &self.handle
    }

    fn actions(&self) -> &'static [ActivityAction] {
        &ActivityAction::ALL
    }

    fn trigger(&self, action: ActivityAction) -> Result<(), ActivityError> {
        info!(activity_id = %self.handle.activity_id, %action, "Action triggered");
        match action {
            ActivityAction::LaunchPeer => {
                self.facade.launch_by_id(&self.settings.peer_bundle_id);
                Ok(())
            }
            ActivityAction::LaunchByMimeType => {
                self.facade.launch_by_mime(&self.settings.mime_type);
                Ok(())
            }
            ActivityAction::LaunchPeerWithDocument => self
                .facade
                .launch_by_id_with_document(&self.settings.document_peer_bundle_id),
            ActivityAction::LaunchWithDocument => self.facade.launch_with_document(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_four_actions_in_display_order() {
        assert_eq!(
            ActivityAction::ALL,
            [
                ActivityAction::LaunchPeer,
                ActivityAction::LaunchByMimeType,
                ActivityAction::LaunchPeerWithDocument,
                ActivityAction::LaunchWithDocument,
            ]
        );
    }

    #[test]
    fn labels_match_buttons() {
        let settings = ActivitySettings::default();
        let labels: Vec<String> = ActivityAction::ALL.iter().map(|a| a.label(&settings)).collect();
        assert_eq!(
            labels,
            vec![
                "Start TurtleBlocks Activity",
                "Start activity that can handle the type 'audio/x-vorbis+ogg'",
                "Start Write Activity with a text object",
                "Start activity that can handle a text object",
            ]
        );
    }

    #[test]
    fn mime_label_follows_settings() {
        let settings = ActivitySettings {
            mime_type: "video/ogg".to_string(),
            ..ActivitySettings::default()
        };
        assert_eq!(
            ActivityAction::LaunchByMimeType.label(&settings),
            "Start activity that can handle the type 'video/ogg'"
        );
    }

    #[test]
    fn only_document_actions_create_documents() {
        let creating: Vec<ActivityAction> = ActivityAction::ALL
            .into_iter()
            .filter(ActivityAction::creates_document)
            .collect();
        assert_eq!(
            creating,
            vec![ActivityAction::LaunchPeerWithDocument, ActivityAction::LaunchWithDocument]
        );
    }

    #[test]
    fn action_serializes_in_snake_case() {
        let json = serde_json::to_string(&ActivityAction::LaunchPeerWithDocument).unwrap();
        assert_eq!(json, "\"launch_peer_with_document\"");
        assert_eq!(ActivityAction::LaunchPeerWithDocument.to_string(), "launch_peer_with_document");
    }

    #[test]
    fn handle_new_generates_activity_id() {
        let a = ActivityHandle::new("org.laptop.HelloWorldActivity");
        let b = ActivityHandle::new("org.laptop.HelloWorldActivity");
        assert_ne!(a.activity_id, b.activity_id);
        assert_eq!(a.object_id, None);
    }
}
