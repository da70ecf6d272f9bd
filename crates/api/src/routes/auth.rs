//! Route definitions for the `/auth` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{auth, profile};
use crate::middleware::guard::require_session;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register          -> register
/// POST /login             -> login
/// POST /logout            -> logout
/// GET  /session           -> session            (session)
/// POST /change-password   -> change_password    (session)
/// GET  /profile           -> get_profile        (session)
/// PUT  /profile           -> update_profile     (session)
/// PUT  /profile/username  -> update_username    (session)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/session", get(auth::session))
        .route("/change-password", post(auth::change_password))
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/profile/username", put(profile::update_username))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(protected)
}
