//! Session-cookie authentication extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::access::Principal;
use folio_core::roles::Role;
use folio_core::types::DbId;
use serde::Serialize;

use super::identity::current_identity;
use crate::auth::jwt::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Message returned with every 401 from the auth layer.
pub const AUTH_REQUIRED: &str = "Authentication required";

/// Authenticated user resolved from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The fields are the token's claims, frozen at issuance. Handlers that need
/// current profile data read the user row instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    #[serde(rename = "id")]
    pub user_id: DbId,
    pub email: String,
    pub role: Role,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AuthUser {
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            username: claims.username,
            first_name: claims.first_name,
            last_name: claims.last_name,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        current_identity(&parts.extensions, &parts.headers, &state.tokens)
            .ok_or_else(|| AppError::unauthorized(AUTH_REQUIRED))
    }
}

/// Caller identity for public endpoints that behave differently when a
/// session is present. Never rejects.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthUser>);

impl OptionalAuth {
    pub fn principal(&self) -> Option<Principal> {
        self.0.as_ref().map(AuthUser::principal)
    }
}

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(current_identity(
            &parts.extensions,
            &parts.headers,
            &state.tokens,
        )))
    }
}
