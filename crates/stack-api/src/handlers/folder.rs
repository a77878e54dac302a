//! Folder CRUD and sharing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use stack_entity::folder::{Folder, FolderWithCounts};

use crate::dto::ApiResponse;
use crate::dto::request::{CreateFolderBody, ListFoldersQuery, ShareFolderBody, UpdateFolderBody};
use crate::error::ApiError;
use crate::extractors::path::parse_optional_uuid;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    ValidatedJson(body): ValidatedJson<CreateFolderBody>,
) -> Result<(StatusCode, Json<ApiResponse<FolderWithCounts>>), ApiError> {
    let folder = state.folder_service.create_folder(&ctx, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/folders?parentId=...
pub async fn list_folders(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(query): Query<ListFoldersQuery>,
) -> Result<Json<ApiResponse<Vec<FolderWithCounts>>>, ApiError> {
    let parent_id = parse_optional_uuid(query.parent_id.as_deref())?;
    let folders = state.folder_service.get_folders(&ctx, parent_id).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FolderWithCounts>>, ApiError> {
    let folder = state
        .folder_service
        .get_folder_by_id(&ctx, parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateFolderBody>,
) -> Result<Json<ApiResponse<FolderWithCounts>>, ApiError> {
    let id = parse_uuid(&id)?;
    let folder = state
        .folder_service
        .update_folder(&ctx, id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .folder_service
        .delete_folder(&ctx, parse_uuid(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/folders/{id}/share
pub async fn share_folder(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<ShareFolderBody>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let id = parse_uuid(&id)?;
    let folder = state
        .folder_service
        .share_folder(&ctx, id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}/share/{user_id}
pub async fn remove_sharing(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&id)?;
    let user_id = parse_uuid(&user_id)?;
    state
        .folder_service
        .remove_sharing(&ctx, id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
