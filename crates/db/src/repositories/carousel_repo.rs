//! Repository for the `carousels` table (home page slides).

use sqlx::PgPool;
use trekpass_core::types::DbId;

use crate::models::carousel::{Carousel, CreateCarousel};

const COLUMNS: &str =
    "id, scenic_spot_id, image_path, display_order, is_active, created_at, updated_at";

pub struct CarouselRepo;

impl CarouselRepo {
    pub async fn create(pool: &PgPool, input: &CreateCarousel) -> Result<Carousel, sqlx::Error> {
        let query = format!(
            "INSERT INTO carousels (scenic_spot_id, image_path, display_order)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Carousel>(&query)
            .bind(input.scenic_spot_id)
            .bind(&input.image_path)
            .bind(input.display_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Active slides in display order, for the home page.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Carousel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM carousels
             WHERE is_active
             ORDER BY display_order, id"
        );
        sqlx::query_as::<_, Carousel>(&query).fetch_all(pool).await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Carousel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM carousels ORDER BY display_order, id");
        sqlx::query_as::<_, Carousel>(&query).fetch_all(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM carousels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
