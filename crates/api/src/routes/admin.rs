//! Route definitions for the `/admin` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::middleware::guard::require_admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// Every route sits behind `require_admin`: no session is 401, a non-admin
/// session is 403, and in both cases the handler never runs.
///
/// ```text
/// GET    /stats              -> stats
/// GET    /users              -> list_users
/// DELETE /users?id=X         -> delete_user
/// PUT    /users/{id}/role    -> update_user_role
/// GET    /projects           -> list_projects
/// DELETE /projects?id=X      -> delete_project
/// GET    /reports            -> list_reports
/// PUT    /reports/{id}       -> update_report
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/users", get(admin::list_users).delete(admin::delete_user))
        .route("/users/{id}/role", put(admin::update_user_role))
        .route(
            "/projects",
            get(admin::list_projects).delete(admin::delete_project),
        )
        .route("/reports", get(admin::list_reports))
        .route("/reports/{id}", put(admin::update_report))
        .route_layer(from_fn_with_state(state.clone(), require_admin))
}
