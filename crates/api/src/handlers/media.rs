//! Handlers for project media galleries.
//!
//! Only URLs are recorded; the files themselves live in external storage.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::access::found;
use folio_core::content::{validate_caption, validate_http_url};
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::media::{CreateMedia, Media, KIND_IMAGE, VALID_KINDS};
use folio_db::repositories::MediaRepo;
use serde::Deserialize;

use super::authorize_mutation;
use super::project::find_visible;
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/media`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateMediaRequest {
    pub url: String,
    pub caption: Option<String>,
    /// `IMAGE` (default) or `VIDEO`.
    pub kind: Option<String>,
}

/// GET /api/projects/{id}/media
pub async fn list_for_project(
    State(state): State<AppState>,
    viewer: OptionalAuth,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Media>>>> {
    let project = find_visible(&state, project_id, viewer.principal().as_ref()).await?;
    let media = MediaRepo::list_by_project(&state.pool, project.id).await?;
    Ok(Json(DataResponse { data: media }))
}

/// POST /api/projects/{id}/media
///
/// The item is owned by the project's owner, even when an admin adds it.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateMediaRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Media>>)> {
    let project = find_visible(&state, project_id, Some(&user.principal())).await?;
    authorize_mutation(&project, &user, "media.create")?;

    let url = input.url.trim().to_string();
    validate_http_url("Media URL", &url)?;
    if let Some(caption) = &input.caption {
        validate_caption(caption)?;
    }
    let kind = input
        .kind
        .map(|k| k.trim().to_uppercase())
        .unwrap_or_else(|| KIND_IMAGE.to_string());
    if !VALID_KINDS.contains(&kind.as_str()) {
        return Err(AppError::validation(format!(
            "Invalid media kind '{kind}'. Must be one of: {VALID_KINDS:?}"
        )));
    }

    let media = MediaRepo::create(
        &state.pool,
        &CreateMedia {
            project_id: project.id,
            user_id: project.user_id,
            url,
            caption: input
                .caption
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            kind,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: media })))
}

/// DELETE /api/media/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let media = found(MediaRepo::find_by_id(&state.pool, id).await?, "Media", id)?;
    authorize_mutation(&media, &user, "media.delete")?;

    if MediaRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound { entity: "Media", id }.into())
    }
}
