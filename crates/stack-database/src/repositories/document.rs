//! Document repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use stack_core::error::{AppError, ErrorKind};
use stack_core::result::AppResult;
use stack_entity::document::{CreateDocument, Document};

/// Repository for document CRUD and per-folder counts.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a document by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// List documents a user can see: their own, plus those in folders
    /// created by or shared with them. Optionally limited to one folder.
    pub async fn find_visible(
        &self,
        user_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT d.* FROM documents d \
             WHERE (? IS NULL OR d.folder_id = ?) \
             AND (d.created_by = ? OR d.folder_id IN ( \
                SELECT f.id FROM folders f WHERE f.created_by = ? \
                UNION \
                SELECT s.folder_id FROM folder_shares s WHERE s.user_id = ?)) \
             ORDER BY d.title ASC, d.id ASC",
        )
        .bind(folder_id)
        .bind(folder_id)
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Create a new document.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO documents (id, title, folder_id, content, created_by, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.id)
        .bind(&data.title)
        .bind(data.folder_id)
        .bind(&data.content)
        .bind(data.created_by)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))?;

        Ok(Document {
            id: data.id,
            title: data.title.clone(),
            folder_id: data.folder_id,
            content: data.content.clone(),
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Delete a document.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Count documents whose `folder_id` is the given folder.
    pub async fn count_by_folder(&self, folder_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE folder_id = ?")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
            })
    }
}
