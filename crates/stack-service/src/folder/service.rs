//! Folder CRUD and sharing with ACL enforcement.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use stack_auth::acl::AclChecker;
use stack_core::error::AppError;
use stack_core::events::FolderEvent;
use stack_database::repositories::{DocumentRepository, FolderRepository};
use stack_entity::folder::name::renamed_path;
use stack_entity::folder::{
    CreateFolder, Folder, FolderMetadata, FolderMetadataPatch, FolderWithCounts, child_path,
    normalize_name,
};
use stack_entity::permission::{FolderAccess, SharePermission};
use stack_pubsub::FolderEventBus;

use crate::context::RequestContext;

/// Maximum number of users in a single share request.
pub const MAX_SHARE_TARGETS: usize = 100;

/// Manages folder CRUD and sharing operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Document repository, for per-folder counts.
    document_repo: Arc<DocumentRepository>,
    /// Access checker.
    acl: AclChecker,
    /// Event publication.
    events: FolderEventBus,
    /// Whether renames rewrite descendant paths.
    cascade_path_updates: bool,
}

/// Request to create a new folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<Uuid>,
    /// Initial metadata.
    pub metadata: Option<FolderMetadata>,
}

/// Partial update of a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    /// New name.
    pub name: Option<String>,
    /// Metadata fields to replace.
    pub metadata: Option<FolderMetadataPatch>,
}

/// Request to grant a permission to a set of users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareFolderRequest {
    /// Users to grant access to.
    pub user_ids: Vec<Uuid>,
    /// Permission to grant.
    pub permission: SharePermission,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        document_repo: Arc<DocumentRepository>,
        events: FolderEventBus,
        cascade_path_updates: bool,
    ) -> Self {
        Self {
            folder_repo,
            document_repo,
            acl: AclChecker::new(),
            events,
            cascade_path_updates,
        }
    }

    /// Loads a folder and requires `required` access on it.
    ///
    /// Missing and invisible folders are both reported as not found.
    async fn load_with_access(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        required: FolderAccess,
    ) -> Result<Folder, AppError> {
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        self.acl.require(&folder, ctx.user_id, required)?;
        Ok(folder)
    }

    /// Attaches document and subfolder counts.
    async fn with_counts(&self, folder: Folder) -> Result<FolderWithCounts, AppError> {
        let document_count = self.document_repo.count_by_folder(folder.id).await?;
        let subfolder_count = self.folder_repo.count_children(folder.id).await?;
        Ok(FolderWithCounts {
            folder,
            document_count,
            subfolder_count,
        })
    }

    /// Rejects `name` if a sibling under `parent_id` already uses it among
    /// the folders visible to any of `viewers`.
    async fn ensure_name_free(
        &self,
        viewers: &BTreeSet<Uuid>,
        parent_id: Option<Uuid>,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), AppError> {
        for viewer in viewers {
            if self
                .folder_repo
                .name_taken(*viewer, parent_id, name, exclude)
                .await?
            {
                return Err(AppError::conflict(format!(
                    "A folder named '{name}' already exists in this location"
                )));
            }
        }
        Ok(())
    }

    /// Creates a new folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> Result<FolderWithCounts, AppError> {
        let name = normalize_name(&req.name)?;

        let parent_path = match req.parent_id {
            Some(parent_id) => {
                let parent = self
                    .load_with_access(ctx, parent_id, FolderAccess::Write)
                    .await?;
                Some(parent.path)
            }
            None => None,
        };

        self.ensure_name_free(&BTreeSet::from([ctx.user_id]), req.parent_id, &name, None)
            .await?;

        let record = CreateFolder {
            id: Uuid::now_v7(),
            path: child_path(parent_path.as_deref(), &name),
            name,
            parent_id: req.parent_id,
            created_by: ctx.user_id,
            metadata: req.metadata.unwrap_or_default(),
        };

        let folder = self.folder_repo.create(&record).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );

        self.events.emit(FolderEvent::Created {
            folder_id: folder.id,
            user_id: ctx.user_id,
            timestamp: Utc::now(),
            name: folder.name.clone(),
            parent_id: folder.parent_id,
            path: folder.path.clone(),
        });

        Ok(FolderWithCounts::empty(folder))
    }

    /// Lists folders visible to the caller, optionally one parent level only.
    pub async fn get_folders(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> Result<Vec<FolderWithCounts>, AppError> {
        if let Some(parent_id) = parent_id {
            self.load_with_access(ctx, parent_id, FolderAccess::Read)
                .await?;
        }

        let folders = self.folder_repo.find_visible(ctx.user_id, parent_id).await?;

        let mut result = Vec::with_capacity(folders.len());
        for folder in folders {
            result.push(self.with_counts(folder).await?);
        }
        Ok(result)
    }

    /// Gets a folder by ID.
    pub async fn get_folder_by_id(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<FolderWithCounts, AppError> {
        let folder = self
            .load_with_access(ctx, folder_id, FolderAccess::Read)
            .await?;
        self.with_counts(folder).await
    }

    /// Renames a folder and/or replaces metadata fields.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        req: UpdateFolderRequest,
    ) -> Result<FolderWithCounts, AppError> {
        let folder = self
            .load_with_access(ctx, folder_id, FolderAccess::Admin)
            .await?;

        let mut changes = Vec::new();
        let mut name = folder.name.clone();
        let mut path = folder.path.clone();

        if let Some(raw) = req.name.as_deref() {
            let new_name = normalize_name(raw)?;
            if new_name != folder.name {
                // Everyone who can see the folder must keep unique sibling names.
                let viewers: BTreeSet<Uuid> = std::iter::once(folder.created_by)
                    .chain(std::iter::once(ctx.user_id))
                    .chain(folder.shared_with.iter().map(|entry| entry.user_id))
                    .collect();
                self.ensure_name_free(&viewers, folder.parent_id, &new_name, Some(folder.id))
                    .await?;
                path = renamed_path(&folder.path, &new_name);
                name = new_name;
                changes.push("name".to_string());
            }
        }

        let mut metadata = folder.metadata.clone();
        if let Some(patch) = req.metadata {
            if patch.apply_to(&mut metadata) {
                changes.push("metadata".to_string());
            }
        }

        let updated = self
            .folder_repo
            .update(folder.id, &name, &path, &metadata)
            .await?;

        if self.cascade_path_updates && path != folder.path {
            let rewritten = self
                .folder_repo
                .update_descendant_paths(folder.id, &path)
                .await?;
            info!(folder_id = %folder.id, rewritten, "Descendant paths updated");
        }

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %updated.path,
            changes = ?changes,
            "Folder updated"
        );

        self.events.emit(FolderEvent::Updated {
            folder_id: updated.id,
            user_id: ctx.user_id,
            timestamp: Utc::now(),
            name: updated.name.clone(),
            path: updated.path.clone(),
            changes,
        });

        self.with_counts(updated).await
    }

    /// Deletes an empty folder.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<(), AppError> {
        let folder = self
            .load_with_access(ctx, folder_id, FolderAccess::Admin)
            .await?;

        let subfolders = self.folder_repo.count_children(folder.id).await?;
        if subfolders > 0 {
            return Err(AppError::conflict(format!(
                "Folder '{}' still contains {subfolders} subfolder(s)",
                folder.name
            )));
        }

        let documents = self.document_repo.count_by_folder(folder.id).await?;
        if documents > 0 {
            return Err(AppError::conflict(format!(
                "Folder '{}' still contains {documents} document(s)",
                folder.name
            )));
        }

        self.folder_repo.delete(folder.id).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder deleted"
        );

        self.events.emit(FolderEvent::Deleted {
            folder_id: folder.id,
            user_id: ctx.user_id,
            timestamp: Utc::now(),
            name: folder.name,
            path: folder.path,
        });

        Ok(())
    }

    /// Grants `permission` to each listed user, replacing existing entries.
    pub async fn share_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        req: ShareFolderRequest,
    ) -> Result<Folder, AppError> {
        let folder = self
            .load_with_access(ctx, folder_id, FolderAccess::Admin)
            .await?;

        let user_ids: Vec<Uuid> = req
            .user_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if user_ids.is_empty() {
            return Err(AppError::validation("userIds must contain at least one user"));
        }
        if user_ids.len() > MAX_SHARE_TARGETS {
            return Err(AppError::validation(format!(
                "A folder can be shared with at most {MAX_SHARE_TARGETS} users per request"
            )));
        }
        if user_ids.contains(&folder.created_by) {
            return Err(AppError::validation(
                "The folder creator already has full access",
            ));
        }

        let shared = self
            .folder_repo
            .upsert_shares(folder.id, &user_ids, req.permission)
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            permission = %req.permission,
            recipients = user_ids.len(),
            "Folder shared"
        );

        self.events.emit(FolderEvent::Shared {
            folder_id: folder.id,
            user_id: ctx.user_id,
            timestamp: Utc::now(),
            shared_with: user_ids,
            permission: req.permission.to_string(),
        });

        Ok(shared)
    }

    /// Revokes a user's share entry. Removing an absent entry succeeds.
    pub async fn remove_sharing(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<(), AppError> {
        let folder = self
            .load_with_access(ctx, folder_id, FolderAccess::Admin)
            .await?;

        let removed = self
            .folder_repo
            .remove_share(folder.id, target_user_id)
            .await?;

        if !removed {
            info!(
                folder_id = %folder.id,
                target_user_id = %target_user_id,
                "No share entry to remove"
            );
            return Ok(());
        }

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            target_user_id = %target_user_id,
            "Folder unshared"
        );

        self.events.emit(FolderEvent::Unshared {
            folder_id: folder.id,
            user_id: ctx.user_id,
            timestamp: Utc::now(),
            target_user_id,
        });

        Ok(())
    }
}
