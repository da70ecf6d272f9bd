//! Handlers for project comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::access::found;
use folio_core::content::validate_comment_body;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::comment::{Comment, CommentWithAuthor, CreateComment};
use folio_db::repositories::CommentRepo;
use serde::Deserialize;

use super::authorize_mutation;
use super::project::find_visible;
use crate::error::{AppJson, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/comments`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub body: String,
}

/// GET /api/projects/{id}/comments
///
/// Oldest first.
pub async fn list_for_project(
    State(state): State<AppState>,
    viewer: OptionalAuth,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithAuthor>>>> {
    let project = find_visible(&state, project_id, viewer.principal().as_ref()).await?;
    let comments = CommentRepo::list_by_project(&state.pool, project.id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/projects/{id}/comments
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let principal = user.principal();
    let project = find_visible(&state, project_id, Some(&principal)).await?;

    let body = input.body.trim().to_string();
    validate_comment_body(&body)?;

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            project_id: project.id,
            user_id: user.user_id,
            body,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = found(CommentRepo::find_by_id(&state.pool, id).await?, "Comment", id)?;
    authorize_mutation(&comment, &user, "comment.delete")?;

    if CommentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Comment",
            id,
        }
        .into())
    }
}
