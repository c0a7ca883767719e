//! Repository for the `collections` (favorites) table.

use sqlx::PgPool;
use trekpass_core::types::DbId;

use crate::models::collection::{Collection, CollectionListing};

pub struct CollectionRepo;

impl CollectionRepo {
    /// Add a spot to the user's favorites. Re-adding is a no-op that returns
    /// the existing row.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        scenic_spot_id: DbId,
    ) -> Result<Collection, sqlx::Error> {
        sqlx::query(
            "INSERT INTO collections (user_id, scenic_spot_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_collections_user_spot DO NOTHING",
        )
        .bind(user_id)
        .bind(scenic_spot_id)
        .execute(pool)
        .await?;

        sqlx::query_as::<_, Collection>(
            "SELECT id, user_id, scenic_spot_id, created_at
             FROM collections WHERE user_id = $1 AND scenic_spot_id = $2",
        )
        .bind(user_id)
        .bind(scenic_spot_id)
        .fetch_one(pool)
        .await
    }

    /// The user's favorites with spot details joined, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CollectionListing>, sqlx::Error> {
        sqlx::query_as::<_, CollectionListing>(
            "SELECT c.id, c.scenic_spot_id, s.name AS spot_name, s.image_path, c.created_at
             FROM collections c
             JOIN scenic_spots s ON s.id = c.scenic_spot_id
             WHERE c.user_id = $1
             ORDER BY c.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Remove a favorite. Returns `true` if removed.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
