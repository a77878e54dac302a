//! Integration tests for documents and their effect on folder deletion.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, id_of};

async fn small_limits_app() -> TestApp {
    let mut config = helpers::test_config();
    config.limits.max_document_bytes = 64;
    config.limits.max_request_bytes = 1024;
    TestApp::with_config(config).await
}

#[tokio::test]
async fn test_documents_block_folder_deletion() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let reports = id_of(&app.create_folder(user, "Reports", None).await);

    let created = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "title": "plan.md", "folderId": reports, "content": "# Plan" })),
            Some(user),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let doc = id_of(&created.body["data"]);
    assert_eq!(created.body["data"]["folderId"], reports.as_str());

    let folder = app
        .request("GET", &format!("/api/folders/{reports}"), None, Some(user))
        .await;
    assert_eq!(folder.body["data"]["documentCount"], 1);

    let blocked = app
        .request("DELETE", &format!("/api/folders/{reports}"), None, Some(user))
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let removed = app
        .request("DELETE", &format!("/api/documents/{doc}"), None, Some(user))
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let deleted = app
        .request("DELETE", &format!("/api/folders/{reports}"), None, Some(user))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_document_visibility_follows_folder_shares() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let reader = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let reports = id_of(&app.create_folder(owner, "Reports", None).await);
    app.share(owner, &reports, &[reader], "read").await;

    let created = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "title": "plan.md", "folderId": reports, "content": "hello" })),
            Some(owner),
        )
        .await;
    let doc = id_of(&created.body["data"]);

    let read = app
        .request("GET", &format!("/api/documents/{doc}"), None, Some(reader))
        .await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["data"]["content"], "hello");

    let listed = app
        .request(
            "GET",
            &format!("/api/documents?folderId={reports}"),
            None,
            Some(reader),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let denied = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "title": "mine.md", "folderId": reports })),
            Some(reader),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/api/documents/{doc}"), None, Some(reader))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let hidden = app
        .request("GET", &format!("/api/documents/{doc}"), None, Some(stranger))
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let nothing = app.request("GET", "/api/documents", None, Some(stranger)).await;
    assert_eq!(nothing.body["data"], json!([]));
}

#[tokio::test]
async fn test_unfiled_documents_belong_to_creator() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let created = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "title": "scratch.txt" })),
            Some(user),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["folderId"], serde_json::Value::Null);
    assert_eq!(created.body["data"]["content"], "");

    let listed = app.request("GET", "/api/documents", None, Some(user)).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_oversized_payloads_are_rejected() {
    let app = small_limits_app().await;
    let user = Uuid::new_v4();

    let too_big_document = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "title": "big.txt", "content": "x".repeat(65) })),
            Some(user),
        )
        .await;
    assert_eq!(too_big_document.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(too_big_document.body["error"], "PAYLOAD_TOO_LARGE");

    let too_big_request = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "name": "Reports",
                "metadata": { "description": "x".repeat(2000) }
            })),
            Some(user),
        )
        .await;
    assert_eq!(too_big_request.status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_missing_folder_is_not_found() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "title": "plan.md", "folderId": Uuid::new_v4() })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/documents?folderId=xyz", None, Some(user))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
