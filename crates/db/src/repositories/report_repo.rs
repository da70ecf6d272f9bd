//! Repository for the `reports` table.

use folio_core::report::OPEN_STATUSES;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{CreateReport, Report};

const COLUMNS: &str = "id, reporter_id, project_id, comment_id, reason, details, status, \
                       reviewed_by, created_at, updated_at";

pub struct ReportRepo;

impl ReportRepo {
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (reporter_id, project_id, comment_id, reason, details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.reporter_id)
            .bind(input.project_id)
            .bind(input.comment_id)
            .bind(&input.reason)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// An open (pending or reviewed) report by `reporter_id` on the same target.
    pub async fn find_open_for_target(
        pool: &PgPool,
        reporter_id: DbId,
        project_id: Option<DbId>,
        comment_id: Option<DbId>,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE reporter_id = $1
               AND project_id IS NOT DISTINCT FROM $2
               AND comment_id IS NOT DISTINCT FROM $3
               AND status = ANY($4)
             LIMIT 1"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(reporter_id)
            .bind(project_id)
            .bind(comment_id)
            .bind(OPEN_STATUSES)
            .fetch_optional(pool)
            .await
    }

    /// List reports newest first, optionally filtered by status.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Set a new status and record which admin made the change.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        reviewed_by: DbId,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET status = $2, reviewed_by = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(status)
            .bind(reviewed_by)
            .fetch_optional(pool)
            .await
    }
}
