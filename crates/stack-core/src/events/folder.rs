//! Folder lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to folder mutations.
///
/// Serialized as a flat JSON object tagged by `type`, e.g.
/// `{"type":"folder:created","folderId":..,"userId":..,"timestamp":..,"name":..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum FolderEvent {
    /// A folder was created.
    #[serde(rename = "folder:created")]
    Created {
        /// The new folder.
        folder_id: Uuid,
        /// The acting user.
        user_id: Uuid,
        /// When the event occurred.
        timestamp: DateTime<Utc>,
        /// Folder name.
        name: String,
        /// Parent folder, if any.
        parent_id: Option<Uuid>,
        /// Derived path.
        path: String,
    },
    /// A folder's name or metadata changed.
    #[serde(rename = "folder:updated")]
    Updated {
        /// The updated folder.
        folder_id: Uuid,
        /// The acting user.
        user_id: Uuid,
        /// When the event occurred.
        timestamp: DateTime<Utc>,
        /// Folder name after the update.
        name: String,
        /// Folder path after the update.
        path: String,
        /// Names of the fields that changed (`name`, `metadata`).
        changes: Vec<String>,
    },
    /// A folder was deleted.
    #[serde(rename = "folder:deleted")]
    Deleted {
        /// The deleted folder.
        folder_id: Uuid,
        /// The acting user.
        user_id: Uuid,
        /// When the event occurred.
        timestamp: DateTime<Utc>,
        /// Name at deletion time.
        name: String,
        /// Path at deletion time.
        path: String,
    },
    /// Access was granted (or changed) for one or more users.
    #[serde(rename = "folder:shared")]
    Shared {
        /// The shared folder.
        folder_id: Uuid,
        /// The acting user.
        user_id: Uuid,
        /// When the event occurred.
        timestamp: DateTime<Utc>,
        /// Users whose entries were upserted.
        shared_with: Vec<Uuid>,
        /// Granted permission (`read`, `write`, `admin`).
        permission: String,
    },
    /// A user's access was revoked.
    #[serde(rename = "folder:unshared")]
    Unshared {
        /// The folder.
        folder_id: Uuid,
        /// The acting user.
        user_id: Uuid,
        /// When the event occurred.
        timestamp: DateTime<Utc>,
        /// The user whose entry was removed.
        target_user_id: Uuid,
    },
}

impl FolderEvent {
    /// The wire name of the event (`folder:created`, ...).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Created { .. } => "folder:created",
            Self::Updated { .. } => "folder:updated",
            Self::Deleted { .. } => "folder:deleted",
            Self::Shared { .. } => "folder:shared",
            Self::Unshared { .. } => "folder:unshared",
        }
    }

    /// The folder the event is about.
    pub fn folder_id(&self) -> Uuid {
        match self {
            Self::Created { folder_id, .. }
            | Self::Updated { folder_id, .. }
            | Self::Deleted { folder_id, .. }
            | Self::Shared { folder_id, .. }
            | Self::Unshared { folder_id, .. } => *folder_id,
        }
    }

    /// The user who caused the event.
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::Created { user_id, .. }
            | Self::Updated { user_id, .. }
            | Self::Deleted { user_id, .. }
            | Self::Shared { user_id, .. }
            | Self::Unshared { user_id, .. } => *user_id,
        }
    }
}
