//! # stack-api
//!
//! HTTP API layer for the Stack document service built on Axum.
//!
//! Provides the folder and document REST endpoints, middleware (CORS,
//! request logging, tracing, compression), extractors, DTOs, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
