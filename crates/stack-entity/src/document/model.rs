//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A text document, optionally placed inside a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Document title.
    pub title: String,
    /// Containing folder (None for unfiled documents).
    pub folder_id: Option<Uuid>,
    /// Document body.
    pub content: String,
    /// The user who created the document.
    pub created_by: Uuid,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Content size in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Data required to create a new document.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    /// Pre-generated document ID.
    pub id: Uuid,
    /// Title, already normalized.
    pub title: String,
    /// Target folder.
    pub folder_id: Option<Uuid>,
    /// Document body.
    pub content: String,
    /// The creating user.
    pub created_by: Uuid,
}
