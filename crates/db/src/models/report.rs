//! Content reports filed by users and triaged by admins.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: DbId,
    pub reporter_id: DbId,
    pub project_id: Option<DbId>,
    pub comment_id: Option<DbId>,
    pub reason: String,
    pub details: Option<String>,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateReport {
    pub reporter_id: DbId,
    pub project_id: Option<DbId>,
    pub comment_id: Option<DbId>,
    pub reason: String,
    pub details: Option<String>,
}
