//! Issuing session responses shared by the auth and profile handlers.

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_db::models::user::{User, UserResponse};
use serde::Serialize;

use crate::auth::cookie::set_session_cookie;
use crate::auth::jwt::IdentityClaims;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// `{ "user": ... }` body returned by the auth endpoints.
#[derive(Debug, Serialize)]
pub struct UserEnvelope<T: Serialize> {
    pub user: T,
}

/// Claims for a user row as it is right now.
pub fn identity_for(user: &User) -> AppResult<IdentityClaims> {
    Ok(IdentityClaims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role()?,
        username: Some(user.username.clone()),
        first_name: Some(user.first_name.clone()),
        last_name: Some(user.last_name.clone()),
    })
}

/// Issue a fresh token for `user` and write it into the session cookie.
pub fn issue_session_cookie(state: &AppState, user: &User) -> AppResult<HeaderMap> {
    let token = state
        .tokens
        .issue(&identity_for(user)?)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let mut headers = HeaderMap::new();
    set_session_cookie(&mut headers, &token, &state.config.cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))?;
    Ok(headers)
}

/// `{user}` response with a freshly issued session cookie.
pub fn session_response(state: &AppState, user: &User, status: StatusCode) -> AppResult<Response> {
    let headers = issue_session_cookie(state, user)?;
    let body: UserEnvelope<UserResponse> = UserEnvelope {
        user: user.to_response(),
    };
    Ok((status, headers, Json(body)).into_response())
}
