//! Aggregate queries for the admin dashboard.

use folio_core::report::{STATUS_PENDING, STATUS_REVIEWED};
use sqlx::PgPool;

use crate::models::stats::PlatformStats;

pub struct StatsRepo;

impl StatsRepo {
    pub async fn platform_stats(pool: &PgPool) -> Result<PlatformStats, sqlx::Error> {
        let query = format!(
            "SELECT
                (SELECT COUNT(*) FROM users)    AS users,
                (SELECT COUNT(*) FROM projects) AS projects,
                (SELECT COUNT(*) FROM comments) AS comments,
                (SELECT COUNT(*) FROM reports
                  WHERE status IN ('{STATUS_PENDING}', '{STATUS_REVIEWED}')) AS open_reports"
        );
        sqlx::query_as::<_, PlatformStats>(&query).fetch_one(pool).await
    }
}
