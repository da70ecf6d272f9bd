//! Handler for filing content reports. Triage lives in `handlers::admin`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::access::found;
use folio_core::report::{validate_details, validate_reason, validate_target};
use folio_core::types::DbId;
use folio_db::models::report::{CreateReport, Report};
use folio_db::repositories::{CommentRepo, ReportRepo};
use serde::Deserialize;

use super::project::find_visible;
use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /reports`. Exactly one target must be set.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub project_id: Option<DbId>,
    pub comment_id: Option<DbId>,
    pub reason: String,
    pub details: Option<String>,
}

/// POST /api/reports
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    validate_target(input.project_id, input.comment_id)?;
    validate_reason(&input.reason)?;
    if let Some(details) = &input.details {
        validate_details(details)?;
    }

    let principal = user.principal();
    if let Some(project_id) = input.project_id {
        find_visible(&state, project_id, Some(&principal)).await?;
    }
    if let Some(comment_id) = input.comment_id {
        found(
            CommentRepo::find_by_id(&state.pool, comment_id).await?,
            "Comment",
            comment_id,
        )?;
    }

    let existing = ReportRepo::find_open_for_target(
        &state.pool,
        user.user_id,
        input.project_id,
        input.comment_id,
    )
    .await?;
    if existing.is_some() {
        return Err(AppError::conflict("You have already reported this content"));
    }

    let report = ReportRepo::create(
        &state.pool,
        &CreateReport {
            reporter_id: user.user_id,
            project_id: input.project_id,
            comment_id: input.comment_id,
            reason: input.reason.trim().to_string(),
            details: input
                .details
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        },
    )
    .await?;

    tracing::info!(report_id = report.id, reporter_id = user.user_id, "Report filed");
    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}
