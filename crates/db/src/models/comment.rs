//! Spot comment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trekpass_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub scenic_spot_id: DbId,
    pub content: String,
    pub reply: Option<String>,
    pub is_replied: bool,
    pub replied_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Comment joined with author name and spot name for admin screens.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentListing {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub scenic_spot_id: DbId,
    pub spot_name: String,
    pub content: String,
    pub reply: Option<String>,
    pub is_replied: bool,
    pub replied_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Filters for admin comment listings.
#[derive(Debug, Default, Deserialize)]
pub struct CommentFilter {
    pub is_replied: Option<bool>,
    /// Matches comment content or spot name.
    pub search: Option<String>,
}

/// Internal DTO for posting a comment on a spot. The author and target are
/// resolved by the handler, never taken from the request body.
#[derive(Debug)]
pub struct CreateComment {
    pub user_id: DbId,
    pub scenic_spot_id: DbId,
    pub content: String,
}
