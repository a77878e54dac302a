//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use stack_auth::jwt::JwtDecoder;
use stack_core::config::AppConfig;
use stack_core::traits::EventPublisher;
use stack_database::DatabasePool;
use stack_service::{DocumentService, FolderService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SQLite connection pool
    pub db: DatabasePool,
    /// Event publisher backing the folder event bus
    pub publisher: Arc<dyn EventPublisher>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Folder service
    pub folder_service: Arc<FolderService>,
    /// Document service
    pub document_service: Arc<DocumentService>,
}
