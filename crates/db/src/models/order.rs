//! Order entity model and DTOs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trekpass_core::order::StatusId;
use trekpass_core::types::{DbId, Timestamp};

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub scenic_spot_id: DbId,
    pub ticket_type_id: DbId,
    pub use_date: NaiveDate,
    pub quantity: i32,
    pub total_price: Decimal,
    pub order_number: String,
    pub status: StatusId,
    pub refund_reason: Option<String>,
    pub refund_amount: Option<Decimal>,
    pub refund_apply_at: Option<Timestamp>,
    pub refund_audit_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order row joined with spot / ticket type / buyer details for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderListing {
    pub id: DbId,
    pub order_number: String,
    pub user_id: DbId,
    pub user_email: String,
    pub scenic_spot_id: DbId,
    pub spot_name: String,
    pub ticket_type_id: DbId,
    pub ticket_type_name: String,
    pub use_date: NaiveDate,
    pub quantity: i32,
    pub total_price: Decimal,
    pub status: StatusId,
    pub refund_reason: Option<String>,
    pub refund_amount: Option<Decimal>,
    pub refund_apply_at: Option<Timestamp>,
    pub refund_audit_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Internal DTO for inserting a new order at checkout.
#[derive(Debug)]
pub struct CreateOrder {
    pub user_id: DbId,
    pub scenic_spot_id: DbId,
    pub ticket_type_id: DbId,
    pub use_date: NaiveDate,
    pub quantity: i32,
    pub total_price: Decimal,
    pub order_number: String,
}

/// Filters for order listings (user order center and admin order screens).
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilter {
    pub status: Option<StatusId>,
    /// Matches order number, buyer email, or spot name.
    pub search: Option<String>,
}

/// Per-status order counts for the admin order list header.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderStatusCounts {
    pub total: i64,
    pub pending: i64,
    pub paid: i64,
    pub canceled: i64,
    pub used: i64,
    pub refunded: i64,
    pub refund_pending: i64,
}
