//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use stack_entity::folder::metadata::{
    MAX_DESCRIPTION_LENGTH, MAX_ICON_LENGTH, MAX_TAG_LENGTH, MAX_TAGS, is_hex_color,
};
use stack_entity::folder::name::check_name;
use stack_entity::folder::{FolderMetadata, FolderMetadataPatch};
use stack_entity::permission::SharePermission;
use stack_service::{
    CreateDocumentRequest as SvcCreateDocument, CreateFolderRequest as SvcCreateFolder,
    ShareFolderRequest as SvcShareFolder, UpdateFolderRequest as SvcUpdateFolder,
};

// `validator` length bounds are `u64`.
const DESCRIPTION_LIMIT: u64 = MAX_DESCRIPTION_LENGTH as u64;
const ICON_LIMIT: u64 = MAX_ICON_LENGTH as u64;

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Validates a folder name or document title after trimming.
fn validate_name(name: &str) -> Result<(), ValidationError> {
    check_name(name.trim()).map_err(|e| invalid("name", e.to_string()))
}

fn validate_color(color: &str) -> Result<(), ValidationError> {
    // An empty string clears the stored color.
    if color.is_empty() || is_hex_color(color) {
        Ok(())
    } else {
        Err(invalid(
            "color",
            format!("'{color}' is not a #RGB or #RRGGBB color"),
        ))
    }
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(invalid("tags", format!("At most {MAX_TAGS} tags are allowed")));
    }
    for tag in tags {
        let len = tag.chars().count();
        if len == 0 || len > MAX_TAG_LENGTH {
            return Err(invalid(
                "tags",
                format!("Tags must be 1 to {MAX_TAG_LENGTH} characters"),
            ));
        }
    }
    Ok(())
}

/// Folder metadata as sent by clients. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MetadataBody {
    /// Free-form description.
    #[validate(length(max = DESCRIPTION_LIMIT))]
    pub description: Option<String>,
    /// Hex color.
    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,
    /// Icon identifier.
    #[validate(length(max = ICON_LIMIT))]
    pub icon: Option<String>,
    /// Tag list.
    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,
}

impl From<MetadataBody> for FolderMetadataPatch {
    fn from(body: MetadataBody) -> Self {
        Self {
            description: body.description,
            color: body.color,
            icon: body.icon,
            tags: body.tags,
        }
    }
}

/// `POST /api/folders` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderBody {
    /// Folder name.
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Parent folder ID.
    pub parent_id: Option<Uuid>,
    /// Initial metadata.
    #[validate(nested)]
    pub metadata: Option<MetadataBody>,
}

impl From<CreateFolderBody> for SvcCreateFolder {
    fn from(body: CreateFolderBody) -> Self {
        Self {
            name: body.name,
            parent_id: body.parent_id,
            metadata: body
                .metadata
                .map(|m| FolderMetadata::from(FolderMetadataPatch::from(m))),
        }
    }
}

/// `PUT /api/folders/{id}` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderBody {
    /// New name.
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    /// Metadata fields to replace.
    #[validate(nested)]
    pub metadata: Option<MetadataBody>,
}

impl From<UpdateFolderBody> for SvcUpdateFolder {
    fn from(body: UpdateFolderBody) -> Self {
        Self {
            name: body.name,
            metadata: body.metadata.map(FolderMetadataPatch::from),
        }
    }
}

/// `POST /api/folders/{id}/share` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareFolderBody {
    /// Users to grant access to.
    #[validate(length(min = 1, max = 100, message = "userIds must list 1 to 100 users"))]
    pub user_ids: Vec<Uuid>,
    /// `read`, `write` or `admin`.
    pub permission: SharePermission,
}

impl From<ShareFolderBody> for SvcShareFolder {
    fn from(body: ShareFolderBody) -> Self {
        Self {
            user_ids: body.user_ids,
            permission: body.permission,
        }
    }
}

/// `POST /api/documents` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentBody {
    /// Document title.
    #[validate(custom(function = "validate_name"))]
    pub title: String,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Document body.
    #[serde(default)]
    pub content: String,
}

impl From<CreateDocumentBody> for SvcCreateDocument {
    fn from(body: CreateDocumentBody) -> Self {
        Self {
            title: body.title,
            folder_id: body.folder_id,
            content: body.content,
        }
    }
}

/// `GET /api/folders` query string. IDs are parsed by the handler so a
/// malformed value maps to a validation error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFoldersQuery {
    /// Restrict to direct children of this folder.
    pub parent_id: Option<String>,
}

/// `GET /api/documents` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    /// Restrict to documents in this folder.
    pub folder_id: Option<String>,
}
