//! Application builder. Wires repositories, services and the router into an
//! Axum app, and runs it.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{info, warn};

use stack_auth::jwt::JwtDecoder;
use stack_core::config::AppConfig;
use stack_core::error::AppError;
use stack_core::traits::EventPublisher;
use stack_database::{DatabasePool, DocumentRepository, FolderRepository};
use stack_pubsub::{FolderEventBus, build_publisher};
use stack_service::{DocumentService, FolderService};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state from an open database and an event publisher.
pub fn build_state(
    config: AppConfig,
    db: DatabasePool,
    publisher: Arc<dyn EventPublisher>,
) -> AppState {
    let pool = db.pool().clone();
    let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
    let document_repo = Arc::new(DocumentRepository::new(pool));

    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&document_repo),
        FolderEventBus::new(Arc::clone(&publisher)),
        config.folders.cascade_path_updates,
    ));
    let document_service = Arc::new(DocumentService::new(
        document_repo,
        folder_repo,
        config.limits.max_document_bytes,
    ));

    AppState {
        jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
        config: Arc::new(config),
        db,
        publisher,
        folder_service,
        document_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Stack server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting Stack server v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect_and_migrate(&config.database).await?;

    // ── Step 2: Event publisher ──────────────────────────────────
    let publisher = build_publisher(&config.events).await?;

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = build_state(config, db.clone(), publisher);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!("Stack server listening on {addr}");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            db.close().await;
            return flatten(joined);
        }
        () = shutdown_signal() => {}
    }

    info!(grace_seconds = grace.as_secs(), "Shutdown signal received, draining requests");
    let _ = shutdown_tx.send(true);

    let result = match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => flatten(joined),
        Err(_) => {
            warn!("Grace period elapsed with requests still in flight");
            server.abort();
            Ok(())
        }
    };

    db.close().await;
    info!("Stack server stopped");
    result
}

fn flatten(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C; waiting indefinitely");
        std::future::pending::<()>().await;
    }
}
