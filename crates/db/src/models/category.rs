use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trekpass_core::types::{DbId, Timestamp};

/// A row from the `categories` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub code: String,
    pub name: String,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub code: Option<String>,
    pub name: Option<String>,
    pub display_order: Option<i32>,
}
