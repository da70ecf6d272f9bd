pub mod admin;
pub mod auth;
pub mod comment;
pub mod health;
pub mod media;
pub mod project;
pub mod report;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public, rate limited)
/// /auth/login                             login (public)
/// /auth/logout                            logout (public)
/// /auth/session                           current identity (session)
/// /auth/change-password                   change password (session)
/// /auth/profile                           get, update own profile (session)
/// /auth/profile/username                  change username (session)
///
/// /projects                               explore, create
/// /projects/{id}                          get, update, delete
/// /projects/{id}/media                    gallery, add item
/// /projects/{id}/comments                 list, add comment
/// /media/{id}                             delete media item
/// /comments/{id}                          delete comment
/// /reports                                file a report
///
/// /admin/stats                            platform counts (admin only)
/// /admin/users                            list, delete ?id= (admin only)
/// /admin/users/{id}/role                  change role (admin only)
/// /admin/projects                         list all, delete ?id= (admin only)
/// /admin/reports                          list ?status= (admin only)
/// /admin/reports/{id}                     change status (admin only)
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/projects", project::router())
        .nest("/media", media::router())
        .nest("/comments", comment::router())
        .nest("/reports", report::router())
        .nest("/admin", admin::router(state))
}
