use serde::Serialize;
use sqlx::FromRow;
use trekpass_core::types::{DbId, Timestamp};

/// A row from the `collections` (favorites) table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collection {
    pub id: DbId,
    pub user_id: DbId,
    pub scenic_spot_id: DbId,
    pub created_at: Timestamp,
}

/// Favorite joined with spot details for the collection page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollectionListing {
    pub id: DbId,
    pub scenic_spot_id: DbId,
    pub spot_name: String,
    pub image_path: String,
    pub created_at: Timestamp,
}
