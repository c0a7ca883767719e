//! Cart line entity model and DTOs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trekpass_core::types::{DbId, Timestamp};

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub user_id: DbId,
    pub scenic_spot_id: DbId,
    pub ticket_type_id: DbId,
    pub use_date: NaiveDate,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart line joined with spot and ticket type details for the cart page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItemListing {
    pub id: DbId,
    pub scenic_spot_id: DbId,
    pub spot_name: String,
    pub ticket_type_id: DbId,
    pub ticket_type_name: String,
    pub unit_price: Decimal,
    pub use_date: NaiveDate,
    pub quantity: i32,
    pub created_at: Timestamp,
}

/// DTO for adding a line to the cart. Re-adding an existing
/// (spot, ticket type, date) line merges quantities.
#[derive(Debug, Deserialize)]
pub struct AddCartItem {
    pub scenic_spot_id: DbId,
    pub ticket_type_id: DbId,
    pub use_date: NaiveDate,
    pub quantity: i32,
}
