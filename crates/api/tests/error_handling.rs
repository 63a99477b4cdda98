//! Direct checks of the `AppError` to HTTP response mapping.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;

use taskdeck_api::error::AppError;
use taskdeck_core::error::CoreError;

use common::body_json;

#[tokio::test]
async fn not_found_maps_to_404_with_entity_and_id() {
    let err = AppError::Core(CoreError::not_found("Project", "abc-123"));
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Project with id abc-123 not found");
}

#[tokio::test]
async fn validation_maps_to_400() {
    let err = AppError::Core(CoreError::Validation("name is required".to_string()));
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name is required");
}

#[tokio::test]
async fn bad_request_maps_to_400() {
    let err = AppError::BadRequest("Missing prompt".to_string());
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Missing prompt");
}

#[tokio::test]
async fn conflict_maps_to_409() {
    let err = AppError::Core(CoreError::Conflict("email already registered".to_string()));
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn unauthorized_maps_to_401() {
    let err = AppError::Core(CoreError::Unauthorized("Invalid token".to_string()));
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid token");
}

#[tokio::test]
async fn permission_denied_maps_to_403() {
    let err = AppError::Core(CoreError::PermissionDenied);
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Permission denied");
}

#[tokio::test]
async fn upstream_failures_map_to_502() {
    let err = AppError::Upstream("provider returned 429".to_string());
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "provider returned 429");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let err = AppError::InternalError("connection string was postgres://user:hunter2@db".to_string());
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn validator_errors_convert_to_validation_errors() {
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
    }

    let form = Form {
        name: String::new(),
    };
    let err: AppError = form.validate().unwrap_err().into();
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
