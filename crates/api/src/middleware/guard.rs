//! Router-level access control.
//!
//! [`require_session`] and [`require_admin`] wrap a whole router with
//! `route_layer`, so a rejected request never reaches a handler.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::auth::{AuthUser, AUTH_REQUIRED};
use super::identity::{current_identity, ResolvedIdentity};
use crate::error::AppError;
use crate::state::AppState;

/// Message returned with every 403 from the admin gate.
pub const ADMIN_REQUIRED: &str = "Admin privileges required";

/// What a protected route demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any valid session.
    Authenticated,
    /// A valid session whose role is `ADMIN`.
    AdminOnly,
}

/// Apply `policy` to a resolved identity.
///
/// No identity is 401; an identity without the required role is 403.
pub fn enforce(identity: Option<AuthUser>, policy: AccessPolicy) -> Result<AuthUser, AppError> {
    let user = identity.ok_or_else(|| AppError::unauthorized(AUTH_REQUIRED))?;

    match policy {
        AccessPolicy::Authenticated => Ok(user),
        AccessPolicy::AdminOnly if user.is_admin() => Ok(user),
        AccessPolicy::AdminOnly => {
            tracing::debug!(user_id = user.user_id, role = %user.role, "Admin route refused");
            Err(AppError::forbidden(ADMIN_REQUIRED))
        }
    }
}

/// Middleware: reject requests without a valid session.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(&state, request, next, AccessPolicy::Authenticated).await
}

/// Middleware: reject requests that are not from an admin.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(&state, request, next, AccessPolicy::AdminOnly).await
}

async fn guard(
    state: &AppState,
    mut request: Request,
    next: Next,
    policy: AccessPolicy,
) -> Result<Response, AppError> {
    let identity = current_identity(request.extensions(), request.headers(), &state.tokens);
    let user = enforce(identity, policy)?;
    request
        .extensions_mut()
        .insert(ResolvedIdentity(Some(user)));
    Ok(next.run(request).await)
}
