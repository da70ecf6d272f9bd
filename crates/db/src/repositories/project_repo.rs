//! Repository for the `projects` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};

const COLUMNS: &str =
    "id, user_id, title, description, repository_url, is_published, created_at, updated_at";

/// Columns for [`ProjectSummary`]; expects `projects p JOIN users u`.
const SUMMARY_COLUMNS: &str = "p.id, p.user_id, u.username AS owner_username, p.title, \
                               p.description, p.repository_url, p.is_published, p.created_at";

/// Provides CRUD and listing operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, title, description, repository_url, is_published)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.repository_url)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Published projects, newest first, optionally filtered by an `ILIKE`
    /// pattern matched against title and description.
    pub async fn list_published(
        pool: &PgPool,
        pattern: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM projects p JOIN users u ON u.id = p.user_id
             WHERE p.is_published = TRUE
               AND ($1::TEXT IS NULL OR p.title ILIKE $1 OR p.description ILIKE $1)
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every project regardless of visibility, newest first.
    pub async fn list_all(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM projects p JOIN users u ON u.id = p.user_id
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Whether `user_id` already owns a project titled `title` (case-insensitive),
    /// ignoring `exclude_id` so a project can keep its own title on update.
    pub async fn title_taken(
        pool: &PgPool,
        user_id: DbId,
        title: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM projects
                WHERE user_id = $1 AND LOWER(title) = LOWER($2)
                  AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(user_id)
        .bind(title)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(taken)
    }

    /// Update a project. Only non-`None` fields in `input` are applied; an
    /// empty description or repository URL is stored as NULL.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = CASE WHEN $3::text IS NULL THEN description
                                   ELSE NULLIF($3, '') END,
                repository_url = CASE WHEN $4::text IS NULL THEN repository_url
                                      ELSE NULLIF($4, '') END,
                is_published = COALESCE($5, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.repository_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project; its media, comments and reports cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
