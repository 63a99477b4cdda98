//! Handlers for the `/auth` resource (signup, login, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use taskdeck_core::entities::{NewUser, User};
use taskdeck_core::error::CoreError;

use crate::auth::events::AuthEvent;
use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an account and return an access token for it.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    // 1. Validate the password before hashing it.
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 2. Validate the remaining fields (name present, email well-formed).
    let new_user = NewUser {
        name: input.name,
        email: input.email,
        password_hash,
    };
    new_user.validate()?;

    // 3. Create the user; duplicate emails surface as 409.
    let user = state.store.create_user(new_user).await?;

    let token = generate_access_token(user.uid, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    state.auth_events.publish(AuthEvent::SignedUp {
        uid: user.uid,
        email: user.email.clone(),
    });

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // The same message for unknown email and wrong password, so the
    // endpoint cannot be used to probe which addresses have accounts.
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = state
        .store
        .find_user_by_email(&input.email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    let token = generate_access_token(user.uid, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    state
        .auth_events
        .publish(AuthEvent::LoggedIn { uid: user.uid });

    Ok(Json(AuthResponse { token, user }))
}

/// POST /api/v1/auth/logout
///
/// Stateless tokens cannot be revoked server-side; this endpoint exists
/// so clients have a definite end-of-session call and observers hear
/// about it.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    state
        .auth_events
        .publish(AuthEvent::LoggedOut { uid: user.uid });
    Ok(StatusCode::NO_CONTENT)
}
