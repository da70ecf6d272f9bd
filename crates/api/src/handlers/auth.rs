//! Handlers for the `/auth` resource (register, login, logout, session,
//! change-password).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use folio_core::error::CoreError;
use folio_core::profile::{
    normalize_email, normalize_username, validate_email, validate_name, validate_username,
};
use folio_core::roles::Role;
use folio_db::models::user::CreateUser;
use folio_db::repositories::UserRepo;
use serde::Deserialize;

use super::session::{session_response, UserEnvelope};
use crate::auth::cookie::clear_session_cookie;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_dummy_password, verify_password,
    MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientAddr;
use crate::middleware::rbac::RequireAuth;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Returned for unknown emails and wrong passwords alike.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a `USER` account and start a session. Attempts are rate limited
/// per client address before any other work is done.
pub async fn register(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<Response> {
    let decision = state.registration_limiter.hit(&client, Utc::now()).await;
    if !decision.is_allowed() {
        tracing::warn!(client = %client, "Registration rate limit exceeded");
        return Err(AppError::Core(CoreError::RateLimited(
            "Too many registration attempts. Please try again later.".into(),
        )));
    }

    let email = normalize_email(&input.email);
    let username = normalize_username(&input.username);
    validate_email(&email)?;
    validate_username(&username)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH).map_err(AppError::validation)?;
    validate_name("First name", &input.first_name)?;
    validate_name("Last name", &input.last_name)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::conflict("Email is already registered"));
    }
    if UserRepo::find_by_username(&state.pool, &username).await?.is_some() {
        return Err(AppError::conflict("Username is already taken"));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still win the race; the unique
    // constraints turn that into a 409 through `AppError::Database`.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            username,
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            role: Role::User,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    session_response(&state, &user, StatusCode::CREATED)
}

/// POST /api/auth/login
///
/// Authenticate with email + password and start a session.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Response> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let Some(user) = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email)).await?
    else {
        // Same Argon2 cost as a wrong password.
        let _ = verify_dummy_password(&input.password);
        tracing::debug!("Login failed: unknown email");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Login failed: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    tracing::info!(user_id = user.id, "User logged in");
    session_response(&state, &user, StatusCode::OK)
}

/// POST /api/auth/logout
///
/// Clear the session cookie. Works with or without a session.
pub async fn logout(State(state): State<AppState>) -> Response {
    let mut headers = HeaderMap::new();
    clear_session_cookie(&mut headers, &state.config.cookie);
    (headers, Json(MessageResponse { message: "Logged out" })).into_response()
}

/// GET /api/auth/session
///
/// The caller's identity as carried by the token.
pub async fn session(user: AuthUser) -> Json<UserEnvelope<AuthUser>> {
    Json(UserEnvelope { user })
}

/// POST /api/auth/change-password
///
/// Replace the password and end the session; the client logs in again.
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(auth_user): RequireAuth,
    AppJson(input): AppJson<ChangePasswordRequest>,
) -> AppResult<Response> {
    if input.current_password.is_empty() {
        return Err(AppError::validation("Current password is required"));
    }
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        })?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::validation("Current password is incorrect"));
    }

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &new_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");

    let mut headers = HeaderMap::new();
    clear_session_cookie(&mut headers, &state.config.cookie);
    Ok((
        headers,
        Json(MessageResponse {
            message: "Password changed. Please log in again.",
        }),
    )
        .into_response())
}
