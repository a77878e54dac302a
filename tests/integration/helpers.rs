//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::broadcast;
use tower::ServiceExt;
use uuid::Uuid;

use stack_auth::JwtEncoder;
use stack_core::config::{AppConfig, DatabaseConfig};
use stack_core::events::FOLDER_EVENTS_CHANNEL;
use stack_database::DatabasePool;
use stack_pubsub::MemoryPubSub;

/// Test application backed by an in-memory database and event bus.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Subscription to `folder:events`
    pub events: broadcast::Receiver<String>,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application with default settings.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application from an adjusted config.
    pub async fn with_config(config: AppConfig) -> Self {
        let db = DatabasePool::connect_and_migrate(&config.database)
            .await
            .expect("Failed to open test database");

        let pubsub = Arc::new(MemoryPubSub::new(64));
        let events = pubsub.subscribe(FOLDER_EVENTS_CHANNEL).await;

        let state = stack_api::build_state(config.clone(), db, pubsub);
        let router = stack_api::build_app(state);

        Self {
            router,
            events,
            encoder: JwtEncoder::new(&config.auth),
            config,
        }
    }

    /// Mint a bearer token for a user.
    pub fn token_for(&self, user_id: Uuid) -> String {
        self.encoder
            .generate_access_token(user_id, None)
            .expect("Failed to mint token")
            .0
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<Uuid>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str, user).await
    }

    /// Make a request with a pre-serialized body.
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        user: Option<Uuid>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(user) = user {
            req = req.header("Authorization", format!("Bearer {}", self.token_for(user)));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a folder and return its JSON.
    pub async fn create_folder(&self, user: Uuid, name: &str, parent_id: Option<&str>) -> Value {
        let mut body = serde_json::json!({ "name": name });
        if let Some(parent_id) = parent_id {
            body["parentId"] = Value::String(parent_id.to_string());
        }
        let response = self.request("POST", "/api/folders", Some(body), Some(user)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Folder creation failed: {:?}",
            response.body
        );
        response.body["data"].clone()
    }

    /// Share a folder and assert success.
    pub async fn share(&self, owner: Uuid, folder_id: &str, users: &[Uuid], permission: &str) {
        let response = self
            .request(
                "POST",
                &format!("/api/folders/{folder_id}/share"),
                Some(serde_json::json!({ "userIds": users, "permission": permission })),
                Some(owner),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Share failed: {:?}", response.body);
    }

    /// Wait for the next event on `folder:events`.
    pub async fn next_event(&mut self) -> Value {
        let payload = tokio::time::timeout(Duration::from_secs(2), self.events.recv())
            .await
            .expect("Timed out waiting for folder event")
            .expect("Event channel closed");
        serde_json::from_str(&payload).expect("Event payload is not JSON")
    }
}

/// Config with an in-memory database and a fixed secret.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Extract `data.id` as a string.
pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("missing id").to_string()
}
