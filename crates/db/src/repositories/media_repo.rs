//! Repository for the `media` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{CreateMedia, Media};

const COLUMNS: &str = "id, project_id, user_id, url, caption, kind, position, created_at";

pub struct MediaRepo;

impl MediaRepo {
    /// Append a media item at the end of the project's gallery.
    pub async fn create(pool: &PgPool, input: &CreateMedia) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (project_id, user_id, url, caption, kind, position)
             VALUES ($1, $2, $3, $4, $5,
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM media WHERE project_id = $1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(&input.url)
            .bind(&input.caption)
            .bind(&input.kind)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Media>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM media WHERE project_id = $1 ORDER BY position, id");
        sqlx::query_as::<_, Media>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
