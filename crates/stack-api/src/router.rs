//! Route definitions for the Stack HTTP API.
//!
//! Routes are grouped by resource and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_request = state.config.limits.max_request_bytes;

    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(document_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_request))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Folder CRUD and sharing
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::update_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/share", post(handlers::folder::share_folder))
        .route(
            "/folders/{id}/share/{user_id}",
            delete(handlers::folder::remove_sharing),
        )
}

/// Document CRUD
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            get(handlers::document::list_documents).post(handlers::document::create_document),
        )
        .route(
            "/documents/{id}",
            get(handlers::document::get_document).delete(handlers::document::delete_document),
        )
}

/// Health check (unauthenticated)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
