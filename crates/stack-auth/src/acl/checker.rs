//! Folder permission checks against ownership and share entries.
//!
//! Resolution order:
//! 1. Owner check: the creator has full control.
//! 2. Share: the caller's `sharedWith` entry, looked up by user ID.
//!
//! A folder the caller holds no access to is reported as not found, so its
//! existence is not disclosed.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use stack_core::error::AppError;
use stack_entity::folder::Folder;
use stack_entity::permission::FolderAccess;

/// Where a caller's access to a folder comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    /// The caller created the folder.
    Owner,
    /// The caller has an entry in `sharedWith`.
    Share,
}

/// Stateless checker for folder access levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct AclChecker;

impl AclChecker {
    /// Creates a new checker.
    pub fn new() -> Self {
        Self
    }

    /// Resolves the caller's effective access and where it comes from.
    pub fn resolve(&self, folder: &Folder, user_id: Uuid) -> Option<(FolderAccess, AccessSource)> {
        if folder.is_creator(user_id) {
            return Some((FolderAccess::Owner, AccessSource::Owner));
        }
        folder
            .shared_with
            .get(&user_id)
            .map(|entry| (FolderAccess::from(entry.permission), AccessSource::Share))
    }

    /// Whether the folder is visible to the caller at all.
    pub fn can_view(&self, folder: &Folder, user_id: Uuid) -> bool {
        self.resolve(folder, user_id).is_some()
    }

    /// Requires at least `required` on the folder.
    ///
    /// Returns not-found when the folder is invisible to the caller and
    /// forbidden when it is visible but the access level is too low.
    pub fn require(
        &self,
        folder: &Folder,
        user_id: Uuid,
        required: FolderAccess,
    ) -> Result<FolderAccess, AppError> {
        let Some((access, source)) = self.resolve(folder, user_id) else {
            return Err(AppError::not_found(format!("Folder {} not found", folder.id)));
        };

        if !access.has_at_least(required) {
            debug!(
                folder_id = %folder.id,
                user_id = %user_id,
                held = access.as_str(),
                required = required.as_str(),
                "Folder access denied"
            );
            return Err(AppError::authorization(format!(
                "{} access to folder {} is required",
                required.as_str(),
                folder.id
            )));
        }

        debug!(folder_id = %folder.id, user_id = %user_id, ?source, "Folder access granted");
        Ok(access)
    }
}
