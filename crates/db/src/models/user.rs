//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trekpass_core::roles::RoleId;
use trekpass_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: RoleId,
    pub phone: Option<String>,
    pub avatar_path: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: RoleId,
    pub phone: Option<String>,
    pub avatar_path: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role,
            phone: u.phone,
            avatar_path: u.avatar_path,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: RoleId,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_path: Option<String>,
    pub role: Option<RoleId>,
    pub is_active: Option<bool>,
}

/// Per-role user counts for the admin user list header.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleCounts {
    pub total: i64,
    pub visitors: i64,
    pub scenic_admins: i64,
    pub admins: i64,
}
