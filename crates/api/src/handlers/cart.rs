//! Cart handlers. Lines are keyed on (spot, ticket type, use date); adding
//! an existing line merges quantities.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use trekpass_core::error::CoreError;
use trekpass_core::types::DbId;
use trekpass_db::models::cart_item::{AddCartItem, CartItem, CartItemListing};
use trekpass_db::repositories::{CartRepo, CollectionRepo, ScenicSpotRepo, TicketTypeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/cart
pub async fn list_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CartItemListing>>>> {
    let items = CartRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<AddCartItem>,
) -> AppResult<(StatusCode, Json<CartItem>)> {
    if input.quantity < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Quantity must be at least 1".into(),
        )));
    }
    if input.use_date < Utc::now().date_naive() {
        return Err(AppError::Core(CoreError::Validation(
            "Use date must not be in the past".into(),
        )));
    }

    let spot = ScenicSpotRepo::find_by_id(&state.pool, input.scenic_spot_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id: input.scenic_spot_id,
        }))?;

    TicketTypeRepo::find_by_id(&state.pool, input.ticket_type_id)
        .await?
        .filter(|t| t.scenic_spot_id == spot.id && t.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket type",
            id: input.ticket_type_id,
        }))?;

    let item = CartRepo::upsert_line(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/v1/cart/{id}
pub async fn remove_from_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = CartRepo::delete_for_user(&state.pool, id, auth_user.user_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Cart item",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/cart/{id}/collect
///
/// Move a cart line's spot into the user's favorites and drop the line.
pub async fn collect_cart_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = CartRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Cart item",
            id,
        }))?;

    CollectionRepo::add(&state.pool, auth_user.user_id, item.scenic_spot_id).await?;
    CartRepo::delete_for_user(&state.pool, id, auth_user.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
