//! Media gallery items attached to a project.
//!
//! Only the storage URL is recorded; uploads are handled by external blob
//! storage.

use folio_core::access::OwnedResource;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

pub const KIND_IMAGE: &str = "IMAGE";
pub const KIND_VIDEO: &str = "VIDEO";
pub const VALID_KINDS: &[&str] = &[KIND_IMAGE, KIND_VIDEO];

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub url: String,
    pub caption: Option<String>,
    pub kind: String,
    pub position: i32,
    pub created_at: Timestamp,
}

impl OwnedResource for Media {
    const ENTITY: &'static str = "Media";

    fn resource_id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

#[derive(Debug, Clone)]
pub struct CreateMedia {
    pub project_id: DbId,
    pub user_id: DbId,
    pub url: String,
    pub caption: Option<String>,
    pub kind: String,
}
