//! Scenic spot entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trekpass_core::types::{DbId, Timestamp};

/// A row from the `scenic_spots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScenicSpot {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_path: String,
    pub address: String,
    pub opening_hours: String,
    pub is_hot: bool,
    pub region_id: DbId,
    pub category_id: DbId,
    pub tags: String,
    pub display_order: i32,
    pub admin_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ScenicSpot {
    /// Split the comma-separated tags column into trimmed labels.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Spot row joined with region and category names for listing pages.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScenicSpotListing {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_path: String,
    pub address: String,
    pub opening_hours: String,
    pub is_hot: bool,
    pub region_id: DbId,
    pub region_name: String,
    pub category_id: DbId,
    pub category_name: String,
    pub tags: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a spot.
#[derive(Debug, Deserialize)]
pub struct CreateScenicSpot {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_path: Option<String>,
    pub address: String,
    pub opening_hours: String,
    pub is_hot: Option<bool>,
    pub region_id: DbId,
    pub category_id: DbId,
    pub tags: Option<String>,
    pub admin_id: Option<DbId>,
}

/// DTO for updating a spot. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateScenicSpot {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_path: Option<String>,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub is_hot: Option<bool>,
    pub region_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub tags: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Search and filter terms for spot listings.
#[derive(Debug, Default)]
pub struct SpotFilter {
    /// Matches name, address, or region name (case-insensitive substring).
    pub search: Option<String>,
    pub region_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub hot_only: bool,
    /// When false, inactive spots are filtered out (public listings).
    pub include_inactive: bool,
}
