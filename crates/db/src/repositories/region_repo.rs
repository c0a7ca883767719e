//! Repository for the `regions` lookup table.

use sqlx::PgPool;
use trekpass_core::types::DbId;

use crate::models::region::{CreateRegion, Region, UpdateRegion};

const COLUMNS: &str = "id, name, display_order, created_at, updated_at";

pub struct RegionRepo;

impl RegionRepo {
    pub async fn create(pool: &PgPool, input: &CreateRegion) -> Result<Region, sqlx::Error> {
        let query = format!(
            "INSERT INTO regions (name, display_order)
             VALUES ($1, COALESCE($2, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Region>(&query)
            .bind(&input.name)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Region>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regions WHERE id = $1");
        sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all regions in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Region>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regions ORDER BY display_order, name");
        sqlx::query_as::<_, Region>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRegion,
    ) -> Result<Option<Region>, sqlx::Error> {
        let query = format!(
            "UPDATE regions SET
                name = COALESCE($2, name),
                display_order = COALESCE($3, display_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a region. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM regions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
