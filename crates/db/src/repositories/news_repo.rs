//! Repository for the `news` table.

use sqlx::PgPool;
use trekpass_core::types::DbId;

use crate::models::news::{CreateNews, News, UpdateNews};

const COLUMNS: &str = "id, title, content, is_announcement, image_path, created_at, updated_at";

pub struct NewsRepo;

impl NewsRepo {
    pub async fn create(pool: &PgPool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, content, is_announcement, image_path)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_announcement)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// News newest first, optionally filtered to announcements only and by a
    /// title search.
    pub async fn list(
        pool: &PgPool,
        announcements_only: bool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news
             WHERE (NOT $1 OR is_announcement)
               AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(announcements_only)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The latest announcements for the home page.
    pub async fn latest_announcements(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news
             WHERE is_announcement
             ORDER BY created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<News>, sqlx::Error> {
        let query = format!(
            "UPDATE news SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                image_path = COALESCE($4, image_path),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_path)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
