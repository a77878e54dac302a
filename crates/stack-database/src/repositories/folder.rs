//! Folder and folder-share repository implementation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use stack_core::error::{AppError, ErrorKind};
use stack_core::result::AppResult;
use stack_entity::folder::{CreateFolder, Folder, FolderMetadata, child_path};
use stack_entity::permission::{ShareEntry, SharePermission, SharedWith};

const FOLDER_COLUMNS: &str = "f.id, f.name, f.parent_id, f.path, f.created_by, f.created_at, \
     f.updated_at, f.is_shared, f.description, f.color, f.icon, f.tags";

/// Matches folders created by, or shared with, the bound user (bound twice).
const VISIBLE_TO_USER: &str = "(f.created_by = ? OR EXISTS \
     (SELECT 1 FROM folder_shares s WHERE s.folder_id = f.id AND s.user_id = ?))";

/// Flat `folders` row; share entries live in their own table.
#[derive(Debug, FromRow)]
struct FolderRow {
    id: Uuid,
    name: String,
    parent_id: Option<Uuid>,
    path: String,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_shared: bool,
    description: Option<String>,
    color: Option<String>,
    icon: Option<String>,
    tags: Json<Vec<String>>,
}

impl FolderRow {
    fn into_folder(self, shared_with: SharedWith) -> Folder {
        Folder {
            id: self.id,
            name: self.name,
            parent_id: self.parent_id,
            path: self.path,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
            is_shared: self.is_shared,
            shared_with,
            metadata: FolderMetadata {
                description: self.description,
                color: self.color,
                icon: self.icon,
                tags: self.tags.0,
            },
        }
    }
}

/// Repository for folder CRUD, tree queries, and share entries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID, including its share entries.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        let sql = format!("SELECT {FOLDER_COLUMNS} FROM folders f WHERE f.id = ?");
        let row = sqlx::query_as::<_, FolderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))?;

        match row {
            Some(row) => {
                let shares = self.find_shares(row.id).await?;
                Ok(Some(row.into_folder(shares)))
            }
            None => Ok(None),
        }
    }

    /// List folders visible to a user, ordered by name.
    ///
    /// With `parent_id` only the direct children of that folder are returned;
    /// without it, every visible folder at any depth.
    pub async fn find_visible(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Folder>> {
        let rows = match parent_id {
            Some(parent_id) => {
                let sql = format!(
                    "SELECT {FOLDER_COLUMNS} FROM folders f \
                     WHERE {VISIBLE_TO_USER} AND f.parent_id = ? ORDER BY f.name ASC, f.id ASC"
                );
                sqlx::query_as::<_, FolderRow>(&sql)
                    .bind(user_id)
                    .bind(user_id)
                    .bind(parent_id)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {FOLDER_COLUMNS} FROM folders f \
                     WHERE {VISIBLE_TO_USER} ORDER BY f.name ASC, f.id ASC"
                );
                sqlx::query_as::<_, FolderRow>(&sql)
                    .bind(user_id)
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))?;

        let mut folders = Vec::with_capacity(rows.len());
        for row in rows {
            let shares = self.find_shares(row.id).await?;
            folders.push(row.into_folder(shares));
        }
        Ok(folders)
    }

    /// Check whether a folder visible to `user_id` already uses `name`
    /// under `parent_id`. `exclude` skips the folder being renamed.
    pub async fn name_taken(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        let sql = format!(
            "SELECT COUNT(*) FROM folders f \
             WHERE f.name = ? AND f.parent_id IS ? AND (? IS NULL OR f.id != ?) \
             AND {VISIBLE_TO_USER}"
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(name)
            .bind(parent_id)
            .bind(exclude)
            .bind(exclude)
            .bind(user_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check folder name", e)
            })?;
        Ok(count > 0)
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO folders \
             (id, name, parent_id, path, created_by, created_at, updated_at, is_shared, \
              description, color, icon, tags) \
             VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?)",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(&data.path)
        .bind(data.created_by)
        .bind(now)
        .bind(now)
        .bind(&data.metadata.description)
        .bind(&data.metadata.color)
        .bind(&data.metadata.icon)
        .bind(Json(&data.metadata.tags))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))?;

        Ok(Folder {
            id: data.id,
            name: data.name.clone(),
            parent_id: data.parent_id,
            path: data.path.clone(),
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
            is_shared: false,
            shared_with: SharedWith::new(),
            metadata: data.metadata.clone(),
        })
    }

    /// Overwrite a folder's name, path, and metadata.
    pub async fn update(
        &self,
        folder_id: Uuid,
        name: &str,
        path: &str,
        metadata: &FolderMetadata,
    ) -> AppResult<Folder> {
        let result = sqlx::query(
            "UPDATE folders SET name = ?, path = ?, description = ?, color = ?, icon = ?, \
             tags = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(path)
        .bind(&metadata.description)
        .bind(&metadata.color)
        .bind(&metadata.icon)
        .bind(Json(&metadata.tags))
        .bind(Utc::now())
        .bind(folder_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update folder", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }

        self.find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Re-derive the path of every descendant of `folder_id` from `new_path`.
    ///
    /// Runs in one transaction. Returns the number of rewritten folders.
    pub async fn update_descendant_paths(&self, folder_id: Uuid, new_path: &str) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let descendants: Vec<(Uuid, Uuid, String)> = sqlx::query_as(
            "WITH RECURSIVE tree (id, parent_id, name, depth) AS ( \
                SELECT id, parent_id, name, 1 FROM folders WHERE parent_id = ? \
                UNION ALL \
                SELECT f.id, f.parent_id, f.name, t.depth + 1 \
                FROM folders f INNER JOIN tree t ON f.parent_id = t.id \
             ) SELECT id, parent_id, name FROM tree ORDER BY depth ASC",
        )
        .bind(folder_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))?;

        let now = Utc::now();
        let mut paths: HashMap<Uuid, String> = HashMap::with_capacity(descendants.len() + 1);
        paths.insert(folder_id, new_path.to_string());

        for (id, parent_id, name) in &descendants {
            let parent_path = paths.get(parent_id).map(String::as_str);
            let path = child_path(parent_path, name);
            sqlx::query("UPDATE folders SET path = ?, updated_at = ? WHERE id = ?")
                .bind(&path)
                .bind(now)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update folder path", e)
                })?;
            paths.insert(*id, path);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        debug!(folder_id = %folder_id, updated = descendants.len(), "Rewrote descendant paths");
        Ok(descendants.len() as u64)
    }

    /// Delete a folder together with its share entries.
    pub async fn delete(&self, folder_id: Uuid) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM folder_shares WHERE folder_id = ?")
            .bind(folder_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder shares", e)
            })?;

        let result = sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(folder_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Count child folders, regardless of who can see them.
    pub async fn count_children(&self, folder_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM folders WHERE parent_id = ?")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count children", e))
    }

    /// Load the share entries of a folder.
    pub async fn find_shares(&self, folder_id: Uuid) -> AppResult<SharedWith> {
        let entries = sqlx::query_as::<_, ShareEntry>(
            "SELECT user_id, permission, shared_at FROM folder_shares \
             WHERE folder_id = ? ORDER BY user_id ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load shares", e))?;

        Ok(entries.into_iter().collect())
    }

    /// Grant `permission` to each user, replacing any existing entry for
    /// that user, and mark the folder as shared.
    pub async fn upsert_shares(
        &self,
        folder_id: Uuid,
        user_ids: &[Uuid],
        permission: SharePermission,
    ) -> AppResult<Folder> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for user_id in user_ids {
            sqlx::query(
                "INSERT INTO folder_shares (folder_id, user_id, permission, shared_at) \
                 VALUES (?, ?, ?, ?) \
                 ON CONFLICT (folder_id, user_id) \
                 DO UPDATE SET permission = excluded.permission, shared_at = excluded.shared_at",
            )
            .bind(folder_id)
            .bind(user_id)
            .bind(permission)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to share folder", e))?;
        }

        sqlx::query("UPDATE folders SET is_shared = 1, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(folder_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mark folder shared", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        self.find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Revoke a user's share entry and recompute `is_shared`.
    ///
    /// Returns whether an entry was removed.
    pub async fn remove_share(&self, folder_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query("DELETE FROM folder_shares WHERE folder_id = ? AND user_id = ?")
            .bind(folder_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove share", e))?;

        sqlx::query(
            "UPDATE folders SET updated_at = ?, is_shared = \
             EXISTS (SELECT 1 FROM folder_shares WHERE folder_id = ?) WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(folder_id)
        .bind(folder_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update share flag", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
