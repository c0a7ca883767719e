use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trekpass_core::types::{DbId, Timestamp};

/// A row from the `carousels` table (home page slides).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Carousel {
    pub id: DbId,
    pub scenic_spot_id: DbId,
    pub image_path: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateCarousel {
    pub scenic_spot_id: DbId,
    pub image_path: String,
    pub display_order: Option<i32>,
}
