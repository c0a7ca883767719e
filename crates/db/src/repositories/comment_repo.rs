//! Repository for the `comments` table.

use sqlx::PgPool;
use trekpass_core::types::DbId;

use crate::models::comment::{Comment, CommentFilter, CommentListing, CreateComment};

const COLUMNS: &str = "id, user_id, scenic_spot_id, content, reply, is_replied, replied_at, \
                       created_at, updated_at";

const LISTING_COLUMNS: &str =
    "c.id, c.user_id, u.username, c.scenic_spot_id, s.name AS spot_name, c.content, \
     c.reply, c.is_replied, c.replied_at, c.created_at";

const LISTING_JOINS: &str = "FROM comments c
             JOIN users u ON u.id = c.user_id
             JOIN scenic_spots s ON s.id = c.scenic_spot_id";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (user_id, scenic_spot_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.user_id)
            .bind(input.scenic_spot_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Comments on one spot, newest first, for the public detail page.
    pub async fn list_for_spot(
        pool: &PgPool,
        scenic_spot_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             {LISTING_JOINS}
             WHERE c.scenic_spot_id = $1
             ORDER BY c.created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CommentListing>(&query)
            .bind(scenic_spot_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All comments for admin moderation, newest first. `scoped_admin`
    /// limits results to spots managed by one scenic admin. The search
    /// term matches comment content or spot name.
    pub async fn list(
        pool: &PgPool,
        filter: &CommentFilter,
        scoped_admin: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             {LISTING_JOINS}
             WHERE ($1::boolean IS NULL OR c.is_replied = $1)
               AND ($2::text IS NULL
                    OR c.content ILIKE '%' || $2 || '%'
                    OR s.name ILIKE '%' || $2 || '%')
               AND ($3::bigint IS NULL OR s.admin_id = $3)
             ORDER BY c.created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, CommentListing>(&query)
            .bind(filter.is_replied)
            .bind(&filter.search)
            .bind(scoped_admin)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Unreplied comments for dashboard widgets, oldest first so the
    /// longest-waiting visitors surface on top.
    pub async fn oldest_unreplied(
        pool: &PgPool,
        scoped_admin: Option<DbId>,
        limit: i64,
    ) -> Result<Vec<CommentListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             {LISTING_JOINS}
             WHERE NOT c.is_replied
               AND ($1::bigint IS NULL OR s.admin_id = $1)
             ORDER BY c.created_at ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, CommentListing>(&query)
            .bind(scoped_admin)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Store the admin reply. When `scoped_admin` is set, the comment must
    /// sit on a spot managed by that scenic admin; returns the updated row
    /// or `None` when missing or out of scope.
    pub async fn reply(
        pool: &PgPool,
        id: DbId,
        scoped_admin: Option<DbId>,
        reply: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET reply = $3, is_replied = TRUE, replied_at = NOW()
             WHERE id = $1
               AND ($2::bigint IS NULL OR scenic_spot_id IN
                    (SELECT id FROM scenic_spots WHERE admin_id = $2))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(scoped_admin)
            .bind(reply)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment, optionally scoped to one scenic admin's spots.
    /// Returns `true` if removed.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        scoped_admin: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM comments
             WHERE id = $1
               AND ($2::bigint IS NULL OR scenic_spot_id IN
                    (SELECT id FROM scenic_spots WHERE admin_id = $2))",
        )
        .bind(id)
        .bind(scoped_admin)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
