//! Handlers for the signed-in user's own profile (`/auth/profile`).

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use folio_core::access::found;
use folio_core::profile::{
    check_username_change_allowed, normalize_email, normalize_username, validate_bio,
    validate_email, validate_name, validate_username,
};
use folio_db::models::user::{UpdateProfile, User, UserResponse};
use folio_db::repositories::UserRepo;
use serde::Deserialize;

use super::session::issue_session_cookie;
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /auth/profile`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
}

/// Request body for `PUT /auth/profile/username`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

async fn load_user(state: &AppState, auth_user: &AuthUser) -> AppResult<User> {
    let row = UserRepo::find_by_id(&state.pool, auth_user.user_id).await?;
    Ok(found(row, "User", auth_user.user_id)?)
}

/// GET /api/auth/profile
///
/// The live user row, not the token's possibly stale claims.
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = load_user(&state, &auth_user).await?;
    Ok(Json(DataResponse {
        data: user.to_response(),
    }))
}

/// PUT /api/auth/profile
///
/// Update names, email and bio. When a field embedded in the session token
/// changes, the cookie is re-issued so the token matches the row.
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<UpdateProfileRequest>,
) -> AppResult<Response> {
    let current = load_user(&state, &auth_user).await?;

    let email = input.email.as_deref().map(normalize_email);
    if let Some(email) = &email {
        validate_email(email)?;
        if *email != current.email {
            if let Some(other) = UserRepo::find_by_email(&state.pool, email).await? {
                if other.id != current.id {
                    return Err(AppError::validation("Email is already in use"));
                }
            }
        }
    }
    if let Some(first_name) = &input.first_name {
        validate_name("First name", first_name)?;
    }
    if let Some(last_name) = &input.last_name {
        validate_name("Last name", last_name)?;
    }
    if let Some(bio) = &input.bio {
        validate_bio(bio)?;
    }

    let changes = UpdateProfile {
        email,
        first_name: input.first_name.map(|s| s.trim().to_string()),
        last_name: input.last_name.map(|s| s.trim().to_string()),
        bio: input.bio.map(|s| s.trim().to_string()),
    };
    let user = UserRepo::update_profile(&state.pool, current.id, &changes).await?;
    let user = found(user, "User", current.id)?;

    let claims_changed = user.email != current.email
        || user.first_name != current.first_name
        || user.last_name != current.last_name;

    let body = Json(DataResponse {
        data: user.to_response(),
    });
    if claims_changed {
        let headers = issue_session_cookie(&state, &user)?;
        Ok((headers, body).into_response())
    } else {
        Ok(body.into_response())
    }
}

/// PUT /api/auth/profile/username
///
/// Checks run in order: format, unchanged, yearly limit, availability.
pub async fn update_username(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<UpdateUsernameRequest>,
) -> AppResult<Response> {
    let username = normalize_username(&input.username);
    validate_username(&username)?;

    let current = load_user(&state, &auth_user).await?;
    if username == current.username {
        return Err(AppError::validation(
            "New username must be different from the current one",
        ));
    }

    check_username_change_allowed(current.username_changed_at, Utc::now())?;

    if UserRepo::find_by_username(&state.pool, &username).await?.is_some() {
        return Err(AppError::conflict("Username is already taken"));
    }

    let user = UserRepo::update_username(&state.pool, current.id, &username).await?;
    let user = found(user, "User", current.id)?;

    tracing::info!(user_id = user.id, "Username changed");

    let headers = issue_session_cookie(&state, &user)?;
    Ok((
        headers,
        Json(DataResponse {
            data: user.to_response(),
        }),
    )
        .into_response())
}
