//! Document operations scoped by folder access.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use stack_auth::acl::AclChecker;
use stack_core::error::AppError;
use stack_database::repositories::{DocumentRepository, FolderRepository};
use stack_entity::document::{CreateDocument, Document};
use stack_entity::folder::{Folder, normalize_name};
use stack_entity::permission::FolderAccess;

use crate::context::RequestContext;

/// Request to create a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    /// Document title.
    pub title: String,
    /// Target folder (None for unfiled).
    pub folder_id: Option<Uuid>,
    /// Document body.
    pub content: String,
}

/// Manages documents. A document is visible to its creator and to anyone
/// who can see its folder.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document repository.
    document_repo: Arc<DocumentRepository>,
    /// Folder repository, for access checks on the containing folder.
    folder_repo: Arc<FolderRepository>,
    /// Access checker.
    acl: AclChecker,
    /// Content size ceiling in bytes.
    max_document_bytes: usize,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        document_repo: Arc<DocumentRepository>,
        folder_repo: Arc<FolderRepository>,
        max_document_bytes: usize,
    ) -> Self {
        Self {
            document_repo,
            folder_repo,
            acl: AclChecker::new(),
            max_document_bytes,
        }
    }

    async fn folder_of(&self, document: &Document) -> Result<Option<Folder>, AppError> {
        match document.folder_id {
            Some(folder_id) => self.folder_repo.find_by_id(folder_id).await,
            None => Ok(None),
        }
    }

    /// Loads a document the caller can see, along with its folder.
    async fn load_visible(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> Result<(Document, Option<Folder>), AppError> {
        let not_found = || AppError::not_found(format!("Document {document_id} not found"));

        let document = self
            .document_repo
            .find_by_id(document_id)
            .await?
            .ok_or_else(not_found)?;
        let folder = self.folder_of(&document).await?;

        let visible = document.created_by == ctx.user_id
            || folder
                .as_ref()
                .is_some_and(|f| self.acl.can_view(f, ctx.user_id));
        if !visible {
            return Err(not_found());
        }
        Ok((document, folder))
    }

    /// Creates a document, optionally inside a writable folder.
    pub async fn create_document(
        &self,
        ctx: &RequestContext,
        req: CreateDocumentRequest,
    ) -> Result<Document, AppError> {
        let title = normalize_name(&req.title)?;

        if req.content.len() > self.max_document_bytes {
            return Err(AppError::payload_too_large(format!(
                "Document content exceeds {} bytes",
                self.max_document_bytes
            )));
        }

        if let Some(folder_id) = req.folder_id {
            let folder = self
                .folder_repo
                .find_by_id(folder_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
            self.acl.require(&folder, ctx.user_id, FolderAccess::Write)?;
        }

        let document = self
            .document_repo
            .create(&CreateDocument {
                id: Uuid::now_v7(),
                title,
                folder_id: req.folder_id,
                content: req.content,
                created_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            folder_id = ?document.folder_id,
            size = document.size(),
            "Document created"
        );

        Ok(document)
    }

    /// Lists documents visible to the caller, optionally in one folder.
    pub async fn list_documents(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> Result<Vec<Document>, AppError> {
        if let Some(folder_id) = folder_id {
            let folder = self
                .folder_repo
                .find_by_id(folder_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
            self.acl.require(&folder, ctx.user_id, FolderAccess::Read)?;
        }

        self.document_repo.find_visible(ctx.user_id, folder_id).await
    }

    /// Gets a document by ID.
    pub async fn get_document(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> Result<Document, AppError> {
        let (document, _) = self.load_visible(ctx, document_id).await?;
        Ok(document)
    }

    /// Deletes a document. Allowed for its creator and for admins of its
    /// folder.
    pub async fn delete_document(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> Result<(), AppError> {
        let (document, folder) = self.load_visible(ctx, document_id).await?;

        let allowed = document.created_by == ctx.user_id
            || folder.as_ref().is_some_and(|f| {
                self.acl
                    .resolve(f, ctx.user_id)
                    .is_some_and(|(access, _)| access.can_manage())
            });
        if !allowed {
            return Err(AppError::authorization(
                "Only the creator or a folder admin can delete this document",
            ));
        }

        self.document_repo.delete(document.id).await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            "Document deleted"
        );
        Ok(())
    }
}
