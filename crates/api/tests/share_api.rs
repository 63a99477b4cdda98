//! Public share-link routes: enabling sharing and reading shared
//! projects without a token.

mod common;

use axum::http::StatusCode;

use common::{body_json, create_project, get, post_json, signup};

// ---------------------------------------------------------------------------
// Enabling sharing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sharing_a_project_returns_a_stable_link() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;
    let project_id = create_project(&app, &token, "Public roadmap").await;

    let response = post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/share"),
        Some(&token),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let share_id = json["share_id"].as_str().unwrap().to_string();
    // A share link is only usable with a real id in it.
    assert_eq!(share_id.len(), 20);
    assert!(share_id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(
        json["share_url"],
        format!("http://localhost:5173/#/share/{share_id}")
    );

    // Sharing again hands out the same id instead of rotating it.
    let response = post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/share"),
        Some(&token),
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["share_id"], share_id);
}

#[tokio::test]
async fn only_the_owner_can_enable_sharing() {
    let app = common::build_test_app();
    let owner = signup(&app, "owner@example.com").await;
    let stranger = signup(&app, "stranger@example.com").await;
    let project_id = create_project(&app, &owner, "Private").await;

    let response = post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/share"),
        Some(&stranger),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Anonymous reads
// ---------------------------------------------------------------------------

/// Shares a project with one task and one note, returning the share id.
async fn share_with_content(
    app: &axum::Router,
    token: &str,
    project_id: &str,
) -> String {
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        Some(token),
        serde_json::json!({ "title": "Ship it" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/notes"),
        Some(token),
        serde_json::json!({ "content": "Launch checklist" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/share"),
        Some(token),
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    json["share_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn shared_projects_are_readable_without_a_token() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;
    let project_id = create_project(&app, &token, "Open house").await;
    let share_id = share_with_content(&app, &token, &project_id).await;

    // 1. The project itself.
    let response = get(&app, &format!("/api/v1/share/{share_id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Open house");
    assert_eq!(json["is_public"], true);

    // 2. Its tasks.
    let response = get(&app, &format!("/api/v1/share/{share_id}/tasks"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let tasks = body_json(response).await;
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["title"], "Ship it");

    // 3. Its notes.
    let response = get(&app, &format!("/api/v1/share/{share_id}/notes"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let notes = body_json(response).await;
    assert_eq!(notes[0]["content"], "Launch checklist");

    // 4. Its files (none uploaded, but the route is open).
    let response = get(&app, &format!("/api/v1/share/{share_id}/files"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let files = body_json(response).await;
    assert!(files.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn shared_projects_are_also_readable_by_their_direct_id() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;
    let project_id = create_project(&app, &token, "Open house").await;
    share_with_content(&app, &token, &project_id).await;

    let response = get(&app, &format!("/api/v1/projects/{project_id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Open house");
}

#[tokio::test]
async fn unknown_share_ids_return_404() {
    let app = common::build_test_app();

    let response = get(&app, "/api/v1/share/no-such-share", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, "/api/v1/share/no-such-share/tasks", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unshared_projects_stay_private() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;
    let project_id = create_project(&app, &token, "Secret").await;

    // Never shared, so anonymous reads by project id fail.
    let response = get(&app, &format!("/api/v1/projects/{project_id}"), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
