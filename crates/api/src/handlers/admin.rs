//! Handlers for the `/admin` resource (dashboard, users, projects, reports).
//!
//! The whole router is wrapped by `require_admin`; handlers additionally take
//! [`RequireAdmin`] so the acting admin's id is at hand.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::access::found;
use folio_core::error::CoreError;
use folio_core::report::{is_open, validate_status, validate_transition};
use folio_core::roles::Role;
use folio_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use folio_core::types::DbId;
use folio_db::models::project::ProjectSummary;
use folio_db::models::report::Report;
use folio_db::models::stats::PlatformStats;
use folio_db::models::user::UserResponse;
use folio_db::repositories::{ProjectRepo, ReportRepo, StatsRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{IdParam, PaginationParams, StatusFilterParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Request body for `PUT /admin/reports/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateReportRequest {
    pub status: String,
}

fn required_id(params: &IdParam) -> AppResult<DbId> {
    params
        .id
        .ok_or_else(|| AppError::BadRequest("Query parameter 'id' is required".into()))
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<PlatformStats>>> {
    let stats = StatsRepo::platform_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(|u| u.to_response()).collect(),
    }))
}

/// PUT /api/admin/users/{id}/role
///
/// The target's existing sessions keep their old role claim until they
/// expire or the user logs in again.
pub async fn update_user_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let role: Role = input.role.trim().parse()?;

    if id == admin.user_id && role != Role::Admin {
        return Err(AppError::BadRequest(
            "You cannot remove your own admin role".into(),
        ));
    }

    let user = found(
        UserRepo::update_role(&state.pool, id, role).await?,
        "User",
        id,
    )?;

    tracing::info!(
        target: "audit",
        admin_id = admin.user_id,
        user_id = id,
        role = %role,
        "User role changed"
    );
    Ok(Json(DataResponse {
        data: user.to_response(),
    }))
}

/// DELETE /api/admin/users?id=X
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<IdParam>,
) -> AppResult<StatusCode> {
    let id = required_id(&params)?;
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".into(),
        ));
    }

    if UserRepo::delete(&state.pool, id).await? {
        tracing::info!(target: "audit", admin_id = admin.user_id, user_id = id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound { entity: "User", id }.into())
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// GET /api/admin/projects
///
/// Every project, including unpublished ones.
pub async fn list_projects(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectSummary>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let projects = ProjectRepo::list_all(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// DELETE /api/admin/projects?id=X
pub async fn delete_project(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<IdParam>,
) -> AppResult<StatusCode> {
    let id = required_id(&params)?;

    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(
            target: "audit",
            admin_id = admin.user_id,
            project_id = id,
            "Project deleted by admin"
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Project",
            id,
        }
        .into())
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// GET /api/admin/reports?status=
pub async fn list_reports(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<Json<DataResponse<Vec<Report>>>> {
    let status = params
        .status
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty());
    if let Some(status) = &status {
        validate_status(status)?;
    }

    let reports = ReportRepo::list(&state.pool, status.as_deref()).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// PUT /api/admin/reports/{id}
///
/// Move a report along its status lifecycle and record the acting admin.
pub async fn update_report(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateReportRequest>,
) -> AppResult<Json<DataResponse<Report>>> {
    let report = found(ReportRepo::find_by_id(&state.pool, id).await?, "Report", id)?;

    let next = input.status.trim().to_uppercase();
    validate_transition(&report.status, &next)?;

    let updated = found(
        ReportRepo::update_status(&state.pool, id, &next, admin.user_id).await?,
        "Report",
        id,
    )?;

    tracing::info!(
        target: "audit",
        admin_id = admin.user_id,
        report_id = id,
        from = %report.status,
        to = %updated.status,
        closed = !is_open(&updated.status),
        "Report status changed"
    );
    Ok(Json(DataResponse { data: updated }))
}
