//! Handlers for the `/profile` resource (personal center).

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use trekpass_core::error::CoreError;
use trekpass_db::models::user::{UpdateUser, UserResponse};
use trekpass_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /profile`. Role and activation are deliberately
/// absent; those change only through the platform admin surface.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_path: Option<String>,
}

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(email) = &input.email {
        if !email.contains('@') {
            return Err(AppError::Core(CoreError::Validation(
                "Email address is not valid".into(),
            )));
        }
    }

    let update = UpdateUser {
        username: input.username,
        email: input.email,
        phone: input.phone,
        avatar_path: input.avatar_path,
        role: None,
        is_active: None,
    };

    let user = UserRepo::update(&state.pool, auth_user.user_id, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(user.into()))
}
