//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::access::{can_access, found, Principal};
use folio_core::content::{validate_description, validate_http_url, validate_title};
use folio_core::error::CoreError;
use folio_core::search::{
    clamp_limit, clamp_offset, escape_like, normalize_search_term, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};
use folio_db::repositories::ProjectRepo;
use serde::Deserialize;

use super::authorize_mutation;
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuth};
use crate::query::ExploreParams;
use crate::response::DataResponse;
use crate::state::AppState;

const DUPLICATE_TITLE: &str = "You already have a project with this title";

/// Request body for `POST /projects`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    pub repository_url: Option<String>,
    pub published: Option<bool>,
}

/// Request body for `PUT /projects/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub repository_url: Option<String>,
    pub published: Option<bool>,
}

/// Load a project the caller may see: published ones for everyone,
/// unpublished ones only for the owner or an admin. Anything else is a 404
/// so hidden drafts are indistinguishable from missing rows.
pub(crate) async fn find_visible(
    state: &AppState,
    id: DbId,
    viewer: Option<&Principal>,
) -> AppResult<Project> {
    let project = found(
        ProjectRepo::find_by_id(&state.pool, id).await?,
        "Project",
        id,
    )?;

    let visible = project.is_published || viewer.is_some_and(|p| can_access(&project, p));
    if visible {
        Ok(project)
    } else {
        Err(CoreError::NotFound {
            entity: "Project",
            id,
        }
        .into())
    }
}

fn validate_optional_url(url: Option<&str>) -> AppResult<()> {
    if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
        validate_http_url("Repository URL", url)?;
    }
    Ok(())
}

/// Blank optional text is stored as NULL.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// GET /api/projects
///
/// Explore published projects, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ExploreParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectSummary>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let pattern = normalize_search_term(params.search.as_deref())
        .map(|term| format!("%{}%", escape_like(&term)));

    let projects =
        ProjectRepo::list_published(&state.pool, pattern.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    viewer: OptionalAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = find_visible(&state, id, viewer.principal().as_ref()).await?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let title = input.title.trim().to_string();
    validate_title(&title)?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    validate_optional_url(input.repository_url.as_deref())?;

    if ProjectRepo::title_taken(&state.pool, user.user_id, &title, None).await? {
        return Err(AppError::conflict(DUPLICATE_TITLE));
    }

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            user_id: user.user_id,
            title,
            description: non_blank(input.description),
            repository_url: non_blank(input.repository_url),
            is_published: input.published.unwrap_or(true),
        },
    )
    .await?;

    tracing::info!(project_id = project.id, user_id = user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProjectRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = find_visible(&state, id, Some(&user.principal())).await?;
    authorize_mutation(&project, &user, "project.update")?;

    let title = input.title.map(|t| t.trim().to_string());
    if let Some(title) = &title {
        validate_title(title)?;
        if ProjectRepo::title_taken(&state.pool, project.user_id, title, Some(id)).await? {
            return Err(AppError::conflict(DUPLICATE_TITLE));
        }
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    validate_optional_url(input.repository_url.as_deref())?;

    let changes = UpdateProject {
        title,
        description: input.description.map(|d| d.trim().to_string()),
        repository_url: input.repository_url.map(|u| u.trim().to_string()),
        is_published: input.published,
    };
    let updated = found(
        ProjectRepo::update(&state.pool, id, &changes).await?,
        "Project",
        id,
    )?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/projects/{id}
///
/// Media and comments on the project cascade.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = find_visible(&state, id, Some(&user.principal())).await?;
    authorize_mutation(&project, &user, "project.delete")?;

    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = id, user_id = user.user_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Project",
            id,
        }
        .into())
    }
}
