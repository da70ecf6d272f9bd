//! Route definitions for the `/projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comment, media, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// Reads are public (drafts visible to owner and admins); writes require a
/// session via the `AuthUser` extractor.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/media       -> media::list_for_project
/// POST   /{id}/media       -> media::create
/// GET    /{id}/comments    -> comment::list_for_project
/// POST   /{id}/comments    -> comment::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/media",
            get(media::list_for_project).post(media::create),
        )
        .route(
            "/{id}/comments",
            get(comment::list_for_project).post(comment::create),
        )
}
