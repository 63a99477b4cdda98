//! HTTP-level integration tests for the entity CRUD endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the
//! router without an actual TCP listener. Storage is in-memory.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, delete, get, patch_json, post_json, signup};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_project_returns_201() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/projects",
        Some(&token),
        serde_json::json!({
            "name": "Atlas",
            "description": "migration work",
            "start_date": "2026-01-01T00:00:00Z",
            "end_date": "2026-06-30T00:00:00Z",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Atlas");
    assert!(json["id"].as_str().is_some());
    assert_eq!(json["is_public"], false);
}

#[tokio::test]
async fn create_project_requires_a_name() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/projects",
        Some(&token),
        serde_json::json!({
            "name": "",
            "start_date": "2026-01-01T00:00:00Z",
            "end_date": "2026-06-30T00:00:00Z",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_nonexistent_project_returns_404() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;

    let response = get(
        &app,
        &format!("/api/v1/projects/{}", Uuid::new_v4()),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_project_patches_only_the_given_fields() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;
    let id = create_project(&app, &token, "Original").await;

    let response = patch_json(
        &app,
        &format!("/api/v1/projects/{id}"),
        Some(&token),
        serde_json::json!({ "name": "Renamed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["description"], "created in tests");
}

#[tokio::test]
async fn another_users_project_is_off_limits() {
    let app = common::build_test_app();
    let owner = signup(&app, "owner@example.com").await;
    let intruder = signup(&app, "intruder@example.com").await;
    let id = create_project(&app, &owner, "Private").await;

    let response = get(&app, &format!("/api/v1/projects/{id}"), Some(&intruder)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = patch_json(
        &app,
        &format!("/api/v1/projects/{id}"),
        Some(&intruder),
        serde_json::json!({ "name": "Hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(&app, &format!("/api/v1/projects/{id}"), Some(&intruder)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Still intact for the owner.
    let response = get(&app, &format!("/api/v1/projects/{id}"), Some(&owner)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Private");
}

// ---------------------------------------------------------------------------
// Tasks and the kanban status transition
// ---------------------------------------------------------------------------

#[tokio::test]
async fn task_lifecycle_with_status_moves() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;
    let project_id = create_project(&app, &token, "Board").await;

    // New tasks default to to_do.
    let response = post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        Some(&token),
        serde_json::json!({ "title": "write docs" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await;
    assert_eq!(task["status"], "to_do");
    let task_id = task["id"].as_str().unwrap().to_string();

    // Move it across the board.
    let response = patch_json(
        &app,
        &format!("/api/v1/tasks/{task_id}/status"),
        Some(&token),
        serde_json::json!({ "status": "in_progress" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let task = body_json(response).await;
    assert_eq!(task["status"], "in_progress");

    // Unknown statuses are rejected at deserialization.
    let response = patch_json(
        &app,
        &format!("/api/v1/tasks/{task_id}/status"),
        Some(&token),
        serde_json::json!({ "status": "paused" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // The rejected move did not stick.
    let response = get(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        Some(&token),
    )
    .await;
    let tasks = body_json(response).await;
    assert_eq!(tasks[0]["status"], "in_progress");
}

#[tokio::test]
async fn deleting_a_project_cascades() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;
    let project_id = create_project(&app, &token, "Doomed").await;

    let response = post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        Some(&token),
        serde_json::json!({ "title": "t1" }),
    )
    .await;
    let task = body_json(response).await;
    let task_id = task["id"].as_str().unwrap();

    post_json(
        &app,
        &format!("/api/v1/tasks/{task_id}/notes"),
        Some(&token),
        serde_json::json!({ "content": "detail" }),
    )
    .await;
    post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/notes"),
        Some(&token),
        serde_json::json!({ "content": "overview" }),
    )
    .await;

    let response = delete(&app, &format!("/api/v1/projects/{project_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Children are gone with the parent.
    let response = get(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(&app, &format!("/api/v1/tasks/{task_id}/notes"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_all_tasks_spans_projects() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;
    let first = create_project(&app, &token, "Alpha").await;
    let second = create_project(&app, &token, "Beta").await;

    for (project_id, title) in [(&first, "one"), (&second, "two")] {
        let response = post_json(
            &app,
            &format!("/api/v1/projects/{project_id}/tasks"),
            Some(&token),
            serde_json::json!({ "title": title }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(&app, "/api/v1/tasks", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let tasks = body_json(response).await;
    assert_eq!(tasks.as_array().unwrap().len(), 2);

    // Another user's backlog is empty, not shared.
    let other = signup(&app, "other@example.com").await;
    let response = get(&app, "/api/v1/tasks", Some(&other)).await;
    let tasks = body_json(response).await;
    assert!(tasks.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn notes_list_newest_first() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;
    let project_id = create_project(&app, &token, "Notes").await;

    for content in ["first", "second"] {
        let response = post_json(
            &app,
            &format!("/api/v1/projects/{project_id}/notes"),
            Some(&token),
            serde_json::json!({ "content": content }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(
        &app,
        &format!("/api/v1/projects/{project_id}/notes"),
        Some(&token),
    )
    .await;
    let notes = body_json(response).await;
    let notes = notes.as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["content"], "second");
    assert_eq!(notes[1]["content"], "first");
}

// ---------------------------------------------------------------------------
// Drawings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drawing_soft_delete_hides_it_from_the_list() {
    let app = common::build_test_app();
    let token = signup(&app, "artist@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/drawings",
        Some(&token),
        serde_json::json!({ "name": "sketch", "records": { "shapes": [] } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let drawing = body_json(response).await;
    let id = drawing["id"].as_str().unwrap();

    let response = delete(&app, &format!("/api/v1/drawings/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, "/api/v1/drawings", Some(&token)).await;
    let drawings = body_json(response).await;
    assert!(drawings.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

#[tokio::test]
async fn weather_serves_demo_data_without_a_provider_key() {
    let app = common::build_test_app();
    let token = signup(&app, "owner@example.com").await;

    let response = get(&app, "/api/v1/weather", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["city"], "Demo City");
    assert!(json["wind_kph"].is_number());
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    let app = common::build_test_app();

    let response = get(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_healthy"], true);
}
