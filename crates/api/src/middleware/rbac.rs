//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the minimum requirement with a structured 403 JSON body. Use
//! these in route handlers to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use trekpass_core::error::CoreError;
use trekpass_core::roles::{ROLE_ADMIN, ROLE_SCENIC_ADMIN};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the platform admin role (2). Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be a platform admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Platform admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires scenic admin (1) or platform admin (2) role. Rejects with 403
/// Forbidden otherwise.
pub struct RequireScenicAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireScenicAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_SCENIC_ADMIN && user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Scenic admin role required".into(),
            )));
        }
        Ok(RequireScenicAdmin(user))
    }
}