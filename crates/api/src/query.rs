//! Shared query parameter types for API handlers.

use folio_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /projects` explore parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ExploreParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?id=` target for the admin delete endpoints.
#[derive(Debug, Deserialize)]
pub struct IdParam {
    pub id: Option<DbId>,
}

/// `?status=` filter for the admin report list.
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilterParams {
    pub status: Option<String>,
}
