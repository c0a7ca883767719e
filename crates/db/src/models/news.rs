use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trekpass_core::types::{DbId, Timestamp};

/// A row from the `news` table. Announcements and ordinary articles are
/// distinguished by `is_announcement`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub is_announcement: bool,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateNews {
    pub title: String,
    pub content: String,
    pub is_announcement: bool,
    pub image_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_path: Option<String>,
}
