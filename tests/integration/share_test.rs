//! Integration tests for folder sharing and access levels.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, id_of};

#[tokio::test]
async fn test_share_grants_visibility() {
    let mut app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let reader = Uuid::new_v4();

    let reports = id_of(&app.create_folder(owner, "Reports", None).await);
    app.next_event().await;

    let before = app
        .request("GET", &format!("/api/folders/{reports}"), None, Some(reader))
        .await;
    assert_eq!(before.status, StatusCode::NOT_FOUND);

    let shared = app
        .request(
            "POST",
            &format!("/api/folders/{reports}/share"),
            Some(json!({ "userIds": [reader], "permission": "read" })),
            Some(owner),
        )
        .await;
    assert_eq!(shared.status, StatusCode::OK);
    assert_eq!(shared.body["data"]["isShared"], true);
    let entries = shared.body["data"]["sharedWith"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["userId"], reader.to_string());
    assert_eq!(entries[0]["permission"], "read");

    let event = app.next_event().await;
    assert_eq!(event["type"], "folder:shared");
    assert_eq!(event["sharedWith"], json!([reader]));
    assert_eq!(event["permission"], "read");

    let after = app
        .request("GET", &format!("/api/folders/{reports}"), None, Some(reader))
        .await;
    assert_eq!(after.status, StatusCode::OK);

    let listed = app.request("GET", "/api/folders", None, Some(reader)).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_resharing_replaces_permission() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let user = Uuid::new_v4();

    let reports = id_of(&app.create_folder(owner, "Reports", None).await);
    app.share(owner, &reports, &[user], "read").await;
    app.share(owner, &reports, &[user, user], "write").await;

    let folder = app
        .request("GET", &format!("/api/folders/{reports}"), None, Some(owner))
        .await;
    let entries = folder.body["data"]["sharedWith"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["permission"], "write");

    let child = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Q1", "parentId": reports })),
            Some(user),
        )
        .await;
    assert_eq!(child.status, StatusCode::CREATED);
    assert_eq!(child.body["data"]["path"], "/Reports/Q1");
    assert_eq!(child.body["data"]["createdBy"], user.to_string());
}

#[tokio::test]
async fn test_read_and_write_sharers_cannot_manage() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let reader = Uuid::new_v4();
    let writer = Uuid::new_v4();

    let reports = id_of(&app.create_folder(owner, "Reports", None).await);
    app.share(owner, &reports, &[reader], "read").await;
    app.share(owner, &reports, &[writer], "write").await;

    for user in [reader, writer] {
        let update = app
            .request(
                "PUT",
                &format!("/api/folders/{reports}"),
                Some(json!({ "name": "Mine" })),
                Some(user),
            )
            .await;
        assert_eq!(update.status, StatusCode::FORBIDDEN);
        assert_eq!(update.body["error"], "FORBIDDEN");

        let delete = app
            .request("DELETE", &format!("/api/folders/{reports}"), None, Some(user))
            .await;
        assert_eq!(delete.status, StatusCode::FORBIDDEN);

        let share = app
            .request(
                "POST",
                &format!("/api/folders/{reports}/share"),
                Some(json!({ "userIds": [Uuid::new_v4()], "permission": "admin" })),
                Some(user),
            )
            .await;
        assert_eq!(share.status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_shared_admin_can_rename_and_share() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let admin = Uuid::new_v4();
    let guest = Uuid::new_v4();

    let reports = id_of(&app.create_folder(owner, "Reports", None).await);
    app.share(owner, &reports, &[admin], "admin").await;

    let renamed = app
        .request(
            "PUT",
            &format!("/api/folders/{reports}"),
            Some(json!({ "name": "Board Reports" })),
            Some(admin),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["data"]["path"], "/Board Reports");

    app.share(admin, &reports, &[guest], "read").await;
    let visible = app
        .request("GET", &format!("/api/folders/{reports}"), None, Some(guest))
        .await;
    assert_eq!(visible.status, StatusCode::OK);
}

#[tokio::test]
async fn test_share_body_is_validated() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let reports = id_of(&app.create_folder(owner, "Reports", None).await);
    let path = format!("/api/folders/{reports}/share");

    let empty = app
        .request(
            "POST",
            &path,
            Some(json!({ "userIds": [], "permission": "read" })),
            Some(owner),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "POST",
            &path,
            Some(json!({ "userIds": [Uuid::new_v4()], "permission": "owner" })),
            Some(owner),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let creator = app
        .request(
            "POST",
            &path,
            Some(json!({ "userIds": [owner], "permission": "read" })),
            Some(owner),
        )
        .await;
    assert_eq!(creator.status, StatusCode::BAD_REQUEST);

    let too_many: Vec<Uuid> = (0..101).map(|_| Uuid::new_v4()).collect();
    let crowd = app
        .request(
            "POST",
            &path,
            Some(json!({ "userIds": too_many, "permission": "read" })),
            Some(owner),
        )
        .await;
    assert_eq!(crowd.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_sharing_is_idempotent() {
    let mut app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let reader = Uuid::new_v4();

    let reports = id_of(&app.create_folder(owner, "Reports", None).await);
    app.share(owner, &reports, &[reader], "read").await;
    app.next_event().await;
    app.next_event().await;

    let path = format!("/api/folders/{reports}/share/{reader}");
    let removed = app.request("DELETE", &path, None, Some(owner)).await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let event = app.next_event().await;
    assert_eq!(event["type"], "folder:unshared");
    assert_eq!(event["targetUserId"], reader.to_string());

    let again = app.request("DELETE", &path, None, Some(owner)).await;
    assert_eq!(again.status, StatusCode::NO_CONTENT);

    let folder = app
        .request("GET", &format!("/api/folders/{reports}"), None, Some(owner))
        .await;
    assert_eq!(folder.body["data"]["isShared"], false);
    assert_eq!(folder.body["data"]["sharedWith"], json!([]));

    let hidden = app
        .request("GET", &format!("/api/folders/{reports}"), None, Some(reader))
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let bad = app
        .request(
            "DELETE",
            &format!("/api/folders/{reports}/share/not-a-uuid"),
            None,
            Some(owner),
        )
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shared_admin_cannot_rename_onto_hidden_sibling() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let admin = Uuid::new_v4();

    let reports = id_of(&app.create_folder(owner, "Reports", None).await);
    app.create_folder(owner, "Archive", None).await;
    app.share(owner, &reports, &[admin], "admin").await;

    let renamed = app
        .request(
            "PUT",
            &format!("/api/folders/{reports}"),
            Some(json!({ "name": "Archive" })),
            Some(admin),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::CONFLICT);

    let listed = app.request("GET", "/api/folders", None, Some(owner)).await;
    let names: Vec<&str> = listed.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Archive", "Reports"]);
}
