//! HTTP-level integration tests for the `/auth` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the
//! router without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signup_returns_token_and_user() {
    let app = common::build_test_app();

    let response = post_json(
        &app,
        "/api/v1/auth/signup",
        None,
        serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "correct-horse-battery",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["user"]["email"], "ada@example.com");
    // The hash must never appear in API responses.
    assert!(json["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn signup_rejects_short_passwords() {
    let app = common::build_test_app();

    let response = post_json(
        &app,
        "/api/v1/auth/signup",
        None,
        serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "short",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let app = common::build_test_app();
    common::signup(&app, "taken@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/auth/signup",
        None,
        serde_json::json!({
            "name": "Other",
            "email": "taken@example.com",
            "password": "another-password",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_correct_credentials_succeeds() {
    let app = common::build_test_app();
    common::signup(&app, "ada@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({
            "email": "ada@example.com",
            "password": "correct-horse-battery",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let app = common::build_test_app();
    common::signup(&app, "ada@example.com").await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({
            "email": "ada@example.com",
            "password": "wrong-password-entirely",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_unknown_email_gives_the_same_error_as_wrong_password() {
    let app = common::build_test_app();
    common::signup(&app, "ada@example.com").await;

    let unknown = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "nobody@example.com", "password": "whatever-this-is" }),
    )
    .await;
    let wrong = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "ada@example.com", "password": "whatever-this-is" }),
    )
    .await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = body_json(unknown).await;
    let wrong_body = body_json(wrong).await;
    assert_eq!(unknown_body["error"], wrong_body["error"]);
}

// ---------------------------------------------------------------------------
// Logout and token handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_requires_a_token() {
    let app = common::build_test_app();

    let response = post_json(&app, "/api/v1/auth/logout", None, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = common::signup(&app, "ada@example.com").await;
    let response = post_json(
        &app,
        "/api/v1/auth/logout",
        Some(&token),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let app = common::build_test_app();

    let response = common::get(&app, "/api/v1/projects", Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
