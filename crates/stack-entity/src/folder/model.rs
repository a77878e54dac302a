//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metadata::FolderMetadata;
use crate::permission::{FolderAccess, SharedWith};

/// A folder in the document hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<Uuid>,
    /// Materialized path (e.g., `/Reports/Q1`).
    pub path: String,
    /// The user who created the folder.
    pub created_by: Uuid,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
    /// Whether any share entries exist.
    pub is_shared: bool,
    /// Share entries keyed by user.
    pub shared_with: SharedWith,
    /// Display metadata.
    pub metadata: FolderMetadata,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if the given user created this folder.
    pub fn is_creator(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }

    /// The access `user_id` holds on this folder, if any.
    pub fn access_for(&self, user_id: Uuid) -> Option<FolderAccess> {
        if self.is_creator(user_id) {
            return Some(FolderAccess::Owner);
        }
        self.shared_with
            .get(&user_id)
            .map(|entry| FolderAccess::from(entry.permission))
    }

    /// Re-derives `is_shared` from the share map.
    pub fn sync_shared_flag(&mut self) {
        self.is_shared = !self.shared_with.is_empty();
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone)]
pub struct CreateFolder {
    /// Pre-generated folder ID.
    pub id: Uuid,
    /// Folder name, already normalized.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
    /// Derived path.
    pub path: String,
    /// The creating user.
    pub created_by: Uuid,
    /// Initial metadata.
    pub metadata: FolderMetadata,
}

/// A folder together with its child counts, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderWithCounts {
    /// The folder itself.
    #[serde(flatten)]
    pub folder: Folder,
    /// Documents whose `folderId` is this folder.
    pub document_count: i64,
    /// Folders whose `parentId` is this folder.
    pub subfolder_count: i64,
}

impl FolderWithCounts {
    /// Wraps a freshly created folder, which has no children yet.
    pub fn empty(folder: Folder) -> Self {
        Self {
            folder,
            document_count: 0,
            subfolder_count: 0,
        }
    }
}
