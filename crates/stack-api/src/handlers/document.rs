//! Document handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use stack_entity::document::Document;

use crate::dto::ApiResponse;
use crate::dto::request::{CreateDocumentBody, ListDocumentsQuery};
use crate::error::ApiError;
use crate::extractors::path::parse_optional_uuid;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /api/documents
pub async fn create_document(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    ValidatedJson(body): ValidatedJson<CreateDocumentBody>,
) -> Result<(StatusCode, Json<ApiResponse<Document>>), ApiError> {
    let document = state
        .document_service
        .create_document(&ctx, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

/// GET /api/documents?folderId=...
pub async fn list_documents(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<ApiResponse<Vec<Document>>>, ApiError> {
    let folder_id = parse_optional_uuid(query.folder_id.as_deref())?;
    let documents = state.document_service.list_documents(&ctx, folder_id).await?;
    Ok(Json(ApiResponse::ok(documents)))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let document = state
        .document_service
        .get_document(&ctx, parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .document_service
        .delete_document(&ctx, parse_uuid(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
