//! Identity resolution.
//!
//! Handlers never read the cookie themselves. Two adapters reach the same
//! [`resolve_identity`] function: extractors call it with the request's own
//! headers, and [`attach_identity`] runs it once per request and leaves the
//! result in the request extensions for extractors to pick up.

use axum::extract::{Request, State};
use axum::http::{Extensions, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use super::auth::AuthUser;
use crate::auth::cookie::read_session_cookie;
use crate::auth::jwt::TokenService;
use crate::state::AppState;

/// The outcome of resolving a request's identity, stored in extensions.
///
/// `ResolvedIdentity(None)` records that resolution ran and found no valid
/// session, so extractors do not verify the token a second time.
#[derive(Debug, Clone)]
pub struct ResolvedIdentity(pub Option<AuthUser>);

/// Read the session cookie and verify it. Absent, malformed, forged and
/// expired tokens all resolve to `None`.
pub fn resolve_identity(headers: &HeaderMap, tokens: &TokenService) -> Option<AuthUser> {
    let token = read_session_cookie(headers)?;
    tokens.verify(&token).map(AuthUser::from)
}

/// Prefer an identity already resolved for this request, otherwise resolve it.
pub fn current_identity(
    extensions: &Extensions,
    headers: &HeaderMap,
    tokens: &TokenService,
) -> Option<AuthUser> {
    match extensions.get::<ResolvedIdentity>() {
        Some(ResolvedIdentity(identity)) => identity.clone(),
        None => resolve_identity(headers, tokens),
    }
}

/// Middleware: resolve the caller once and attach a [`ResolvedIdentity`].
pub async fn attach_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = resolve_identity(request.headers(), &state.tokens);
    request.extensions_mut().insert(ResolvedIdentity(identity));
    next.run(request).await
}
