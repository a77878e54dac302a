//! Integration tests for folder create, list, update and delete.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, id_of};

#[tokio::test]
async fn test_paths_follow_the_tree() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let reports = app.create_folder(user, "Reports", None).await;
    assert_eq!(reports["path"], "/Reports");
    assert_eq!(reports["parentId"], serde_json::Value::Null);
    assert_eq!(reports["documentCount"], 0);
    assert_eq!(reports["subfolderCount"], 0);
    assert_eq!(reports["isShared"], false);
    assert_eq!(reports["metadata"]["tags"], json!([]));

    let reports_id = id_of(&reports);
    let q1 = app.create_folder(user, "Q1", Some(&reports_id)).await;
    assert_eq!(q1["path"], "/Reports/Q1");
    assert_eq!(q1["parentId"], reports_id.as_str());

    let duplicate = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Q1", "parentId": reports_id })),
            Some(user),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["error"], "CONFLICT");

    let fetched = app
        .request("GET", &format!("/api/folders/{reports_id}"), None, Some(user))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["success"], true);
    assert_eq!(fetched.body["data"]["subfolderCount"], 1);
}

#[tokio::test]
async fn test_same_name_allowed_under_different_parents() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let a = id_of(&app.create_folder(user, "A", None).await);
    let b = id_of(&app.create_folder(user, "B", None).await);

    let under_a = app.create_folder(user, "Shared", Some(&a)).await;
    let under_b = app.create_folder(user, "Shared", Some(&b)).await;
    assert_eq!(under_a["path"], "/A/Shared");
    assert_eq!(under_b["path"], "/B/Shared");
}

#[tokio::test]
async fn test_invalid_names_are_rejected() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let long = "x".repeat(256);
    for name in ["", "   ", "a/b", "bad:name", long.as_str()] {
        let response = app
            .request("POST", "/api/folders", Some(json!({ "name": name })), Some(user))
            .await;
        assert_eq!(
            response.status,
            StatusCode::BAD_REQUEST,
            "name {name:?} should be rejected"
        );
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_invalid_metadata_is_rejected() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Reports", "metadata": { "color": "blue" } })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "name": "Reports",
                "metadata": { "color": "#1e90ff", "description": "Quarterly", "tags": ["finance"] }
            })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["metadata"]["color"], "#1e90ff");
    assert_eq!(response.body["data"]["metadata"]["tags"], json!(["finance"]));
}

#[tokio::test]
async fn test_parent_must_exist_and_be_writable() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let reader = Uuid::new_v4();

    let missing = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Q1", "parentId": Uuid::new_v4() })),
            Some(owner),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let reports = id_of(&app.create_folder(owner, "Reports", None).await);
    app.share(owner, &reports, &[reader], "read").await;

    let forbidden = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Q1", "parentId": reports })),
            Some(reader),
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_listing_is_scoped_to_visible_folders() {
    let app = TestApp::new().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let reports = id_of(&app.create_folder(alice, "Reports", None).await);
    app.create_folder(alice, "Q1", Some(&reports)).await;
    app.create_folder(alice, "Archive", None).await;
    app.create_folder(bob, "Private", None).await;

    let all = app.request("GET", "/api/folders", None, Some(alice)).await;
    assert_eq!(all.status, StatusCode::OK);
    let names: Vec<&str> = all.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Archive", "Q1", "Reports"]);

    let children = app
        .request(
            "GET",
            &format!("/api/folders?parentId={reports}"),
            None,
            Some(alice),
        )
        .await;
    assert_eq!(children.status, StatusCode::OK);
    assert_eq!(children.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(children.body["data"][0]["path"], "/Reports/Q1");

    let hidden = app
        .request(
            "GET",
            &format!("/api/folders?parentId={reports}"),
            None,
            Some(bob),
        )
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let bad = app
        .request("GET", "/api/folders?parentId=nope", None, Some(alice))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_does_not_rewrite_descendants_by_default() {
    let mut app = TestApp::new().await;
    let user = Uuid::new_v4();

    let reports = id_of(&app.create_folder(user, "Reports", None).await);
    let q1 = id_of(&app.create_folder(user, "Q1", Some(&reports)).await);
    app.next_event().await;
    app.next_event().await;

    let renamed = app
        .request(
            "PUT",
            &format!("/api/folders/{reports}"),
            Some(json!({ "name": "Archive" })),
            Some(user),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["data"]["path"], "/Archive");
    assert_eq!(renamed.body["data"]["name"], "Archive");

    let event = app.next_event().await;
    assert_eq!(event["type"], "folder:updated");
    assert_eq!(event["changes"], json!(["name"]));

    let child = app
        .request("GET", &format!("/api/folders/{q1}"), None, Some(user))
        .await;
    assert_eq!(child.body["data"]["path"], "/Reports/Q1");
}

#[tokio::test]
async fn test_rename_cascades_when_enabled() {
    let mut config = helpers::test_config();
    config.folders.cascade_path_updates = true;
    let app = TestApp::with_config(config).await;
    let user = Uuid::new_v4();

    let reports = id_of(&app.create_folder(user, "Reports", None).await);
    let q1 = id_of(&app.create_folder(user, "Q1", Some(&reports)).await);
    let jan = id_of(&app.create_folder(user, "Jan", Some(&q1)).await);

    let renamed = app
        .request(
            "PUT",
            &format!("/api/folders/{reports}"),
            Some(json!({ "name": "Archive" })),
            Some(user),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);

    let leaf = app
        .request("GET", &format!("/api/folders/{jan}"), None, Some(user))
        .await;
    assert_eq!(leaf.body["data"]["path"], "/Archive/Q1/Jan");
}

#[tokio::test]
async fn test_rename_conflicts_with_sibling() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    app.create_folder(user, "Reports", None).await;
    let archive = id_of(&app.create_folder(user, "Archive", None).await);

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{archive}"),
            Some(json!({ "name": "Reports" })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_metadata_patch_keeps_unlisted_fields() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let created = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "name": "Reports",
                "metadata": { "description": "Quarterly", "color": "#fff" }
            })),
            Some(user),
        )
        .await;
    let id = id_of(&created.body["data"]);

    let updated = app
        .request(
            "PUT",
            &format!("/api/folders/{id}"),
            Some(json!({ "metadata": { "color": "#000" } })),
            Some(user),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["metadata"]["color"], "#000");
    assert_eq!(updated.body["data"]["metadata"]["description"], "Quarterly");
    assert_eq!(updated.body["data"]["name"], "Reports");
}

#[tokio::test]
async fn test_empty_metadata_values_clear_fields() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let created = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "name": "Reports",
                "metadata": { "description": "Quarterly", "color": "#fff", "icon": "chart" }
            })),
            Some(user),
        )
        .await;
    let id = id_of(&created.body["data"]);

    let updated = app
        .request(
            "PUT",
            &format!("/api/folders/{id}"),
            Some(json!({ "metadata": { "color": "", "description": "" } })),
            Some(user),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert!(updated.body["data"]["metadata"]["color"].is_null());
    assert!(updated.body["data"]["metadata"]["description"].is_null());
    assert_eq!(updated.body["data"]["metadata"]["icon"], "chart");
}

#[tokio::test]
async fn test_delete_requires_empty_folder() {
    let mut app = TestApp::new().await;
    let user = Uuid::new_v4();

    let reports = id_of(&app.create_folder(user, "Reports", None).await);
    let q1 = id_of(&app.create_folder(user, "Q1", Some(&reports)).await);
    app.next_event().await;
    app.next_event().await;

    let blocked = app
        .request("DELETE", &format!("/api/folders/{reports}"), None, Some(user))
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let deleted = app
        .request("DELETE", &format!("/api/folders/{q1}"), None, Some(user))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let event = app.next_event().await;
    assert_eq!(event["type"], "folder:deleted");
    assert_eq!(event["folderId"], q1.as_str());
    assert_eq!(event["path"], "/Reports/Q1");

    let deleted = app
        .request("DELETE", &format!("/api/folders/{reports}"), None, Some(user))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/api/folders/{reports}"), None, Some(user))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_emits_event() {
    let mut app = TestApp::new().await;
    let user = Uuid::new_v4();

    let reports = app.create_folder(user, "Reports", None).await;

    let event = app.next_event().await;
    assert_eq!(event["type"], "folder:created");
    assert_eq!(event["folderId"], reports["id"]);
    assert_eq!(event["userId"], user.to_string());
    assert_eq!(event["path"], "/Reports");
}

#[tokio::test]
async fn test_requests_need_a_valid_token() {
    let app = TestApp::new().await;

    let anonymous = app.request("GET", "/api/folders", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body["error"], "UNAUTHORIZED");

    let forged = {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let req = Request::builder()
            .uri("/api/folders")
            .header("Authorization", "Bearer not.a.jwt")
            .body(Body::empty())
            .unwrap();
        app.router.clone().oneshot(req).await.unwrap()
    };
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");
    assert_eq!(health.body["data"]["events"], "memory");
}

#[tokio::test]
async fn test_malformed_ids_are_bad_requests() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    let response = app
        .request("GET", "/api/folders/not-a-uuid", None, Some(user))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("DELETE", "/api/folders/123", None, Some(user))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
