//! Handler-level access gates.
//!
//! The same [`AccessPolicy`] checks as the router middleware in
//! [`super::guard`], as extractors. A handler that names one of these in its
//! signature cannot run for a caller the policy rejects, even when mounted
//! outside a guarded router.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use super::guard::{enforce, AccessPolicy};
use super::identity::current_identity;
use crate::error::AppError;
use crate::state::AppState;

fn gate(parts: &Parts, state: &AppState, policy: AccessPolicy) -> Result<AuthUser, AppError> {
    let identity = current_identity(&parts.extensions, &parts.headers, &state.tokens);
    enforce(identity, policy)
}

/// An `ADMIN` caller. 401 without a session, 403 for any other role.
///
/// ```ignore
/// async fn purge(RequireAdmin(admin): RequireAdmin) -> AppResult<StatusCode> {
///     tracing::info!(target: "audit", admin_id = admin.user_id, "purge");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        gate(parts, state, AccessPolicy::AdminOnly).map(RequireAdmin)
    }
}

/// Any signed-in caller. Same rejection as [`AuthUser`]; used where the
/// handler signature should state that a session is mandatory.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        gate(parts, state, AccessPolicy::Authenticated).map(RequireAuth)
    }
}
