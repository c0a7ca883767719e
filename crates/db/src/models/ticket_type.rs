//! Ticket type entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trekpass_core::types::{DbId, Timestamp};

/// Ticket kind discriminants stored in `ticket_types.kind`.
pub const KIND_SINGLE: &str = "single";
pub const KIND_PACKAGE: &str = "package";

/// A row from the `ticket_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketType {
    pub id: DbId,
    pub scenic_spot_id: DbId,
    pub name: String,
    pub kind: String,
    pub price: Decimal,
    pub description: String,
    pub default_stock: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a ticket type.
#[derive(Debug, Deserialize)]
pub struct CreateTicketType {
    pub scenic_spot_id: DbId,
    pub name: String,
    pub kind: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub default_stock: i32,
}

/// DTO for updating a ticket type. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicketType {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub default_stock: Option<i32>,
    pub is_active: Option<bool>,
}
