//! Comments left on projects.

use folio_core::access::OwnedResource;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnedResource for Comment {
    const ENTITY: &'static str = "Comment";

    fn resource_id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

/// A comment joined with its author's username for display.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub author_username: String,
    pub body: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateComment {
    pub project_id: DbId,
    pub user_id: DbId,
    pub body: String,
}
