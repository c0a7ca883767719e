//! Order-center handlers for visitors: listing, detail, cancel, refund
//! request, and the weather advisory.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use trekpass_core::error::CoreError;
use trekpass_core::order::{OrderStatus, StatusId};
use trekpass_core::types::DbId;
use trekpass_db::models::order::{Order, OrderListing};
use trekpass_db::repositories::{clamp_limit, clamp_offset, DateStockRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::checkout::forecast_for_order;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::weather::Forecast;

/// Query parameters for `GET /orders`.
#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    pub status: Option<StatusId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /orders/{id}/refund`.
#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    pub reason: String,
}

/// Response body for `GET /orders/{id}/weather`.
#[derive(Debug, Serialize)]
pub struct WeatherAdvisoryResponse {
    pub available: bool,
    pub forecast: Option<Forecast>,
}

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<DataResponse<Vec<OrderListing>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let orders =
        OrderRepo::list_for_user(&state.pool, auth_user.user_id, params.status, limit, offset)
            .await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderListing>> {
    // Ownership first, then the joined detail row.
    OrderRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    let listing = OrderRepo::find_listing(&state.pool, id, None)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    Ok(Json(listing))
}

/// POST /api/v1/orders/{id}/cancel
///
/// Pending orders only. The reservation made at checkout is returned to
/// the ledger.
pub async fn cancel_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Order>> {
    let order = OrderRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    let canceled = OrderRepo::transition(
        &state.pool,
        order.id,
        OrderStatus::Pending,
        OrderStatus::Canceled,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Only pending orders can be canceled".into(),
        ))
    })?;

    release_order_inventory(&state, &canceled).await?;

    Ok(Json(canceled))
}

/// POST /api/v1/orders/{id}/refund
///
/// Paid orders only. Moves the order to RefundPending for admin review;
/// inventory is untouched until approval.
pub async fn request_refund(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<RefundRequest>,
) -> AppResult<Json<Order>> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Refund reason must not be empty".into(),
        )));
    }

    OrderRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    let order = OrderRepo::apply_refund(&state.pool, id, auth_user.user_id, input.reason.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only paid orders can request a refund".into(),
            ))
        })?;

    Ok(Json(order))
}

/// GET /api/v1/orders/{id}/weather
///
/// Forecast for the order's spot region and visit date. Lookup failure is
/// reported as unavailable, never as an error.
pub async fn order_weather(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WeatherAdvisoryResponse>> {
    let order = OrderRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    if order.status != OrderStatus::Paid.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Weather advisory is only available for paid orders".into(),
        )));
    }

    let forecast = forecast_for_order(&state, &order).await;

    Ok(Json(WeatherAdvisoryResponse {
        available: forecast.is_some(),
        forecast,
    }))
}

/// Return an order's reserved quantity to the ledger.
///
/// Used on cancel and on refund approval. The guarded release makes a
/// double call a no-op rather than a stock inflation.
pub(crate) async fn release_order_inventory(
    state: &AppState,
    order: &Order,
) -> Result<(), AppError> {
    let ledger =
        DateStockRepo::find_for_date(&state.pool, order.ticket_type_id, order.use_date).await?;

    match ledger {
        Some(row) => {
            if !DateStockRepo::release(&state.pool, row.id, order.quantity).await? {
                tracing::warn!(
                    order_id = order.id,
                    ledger_id = row.id,
                    quantity = order.quantity,
                    "Inventory release skipped, sold counter below quantity"
                );
            }
            Ok(())
        }
        None => {
            // A reserved order always has a ledger row; log and move on.
            tracing::error!(
                order_id = order.id,
                ticket_type_id = order.ticket_type_id,
                "No inventory ledger row found when releasing order"
            );
            Ok(())
        }
    }
}
