//! Scenic-admin handlers, mounted at `/scenic-admin`.
//!
//! Every handler is scoped to the spots whose `admin_id` is the caller.
//! A spot managed by someone else is indistinguishable from a missing one:
//! scoped lookups return 404, never 403.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trekpass_core::error::CoreError;
use trekpass_core::order::OrderStatus;
use trekpass_core::types::DbId;
use trekpass_db::models::comment::{Comment, CommentFilter, CommentListing};
use trekpass_db::models::date_stock::DateStock;
use trekpass_db::models::order::{Order, OrderFilter, OrderListing};
use trekpass_db::models::scenic_spot::{CreateScenicSpot, ScenicSpot, UpdateScenicSpot};
use trekpass_db::models::ticket_type::{
    CreateTicketType, TicketType, UpdateTicketType, KIND_PACKAGE, KIND_SINGLE,
};
use trekpass_db::repositories::{
    clamp_limit, clamp_offset, CommentRepo, DateStockRepo, OrderRepo, ScenicSpotRepo,
    TicketTypeRepo,
};

use crate::error::{AppError, AppResult};
use crate::handlers::orders::release_order_inventory;
use crate::middleware::rbac::RequireScenicAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Dashboard payload for the scenic admin landing page.
#[derive(Debug, Serialize)]
pub struct ScenicDashboardResponse {
    pub spot_count: i64,
    pub today_orders: i64,
    pub total_sales: Decimal,
    pub recent_orders: Vec<OrderListing>,
    pub unreplied_comments: Vec<CommentListing>,
}

/// GET /api/v1/scenic-admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
) -> AppResult<Json<ScenicDashboardResponse>> {
    let scope = Some(user.user_id);

    let spot_count = ScenicSpotRepo::count(&state.pool, scope).await?;
    let today_orders = OrderRepo::today_count(&state.pool, scope).await?;
    let total_sales = OrderRepo::total_paid_sales(&state.pool, scope).await?;
    let recent_orders = OrderRepo::recent(&state.pool, scope, 2).await?;
    let unreplied_comments = CommentRepo::oldest_unreplied(&state.pool, scope, 2).await?;

    Ok(Json(ScenicDashboardResponse {
        spot_count,
        today_orders,
        total_sales,
        recent_orders,
        unreplied_comments,
    }))
}

// ---------------------------------------------------------------------------
// Spots
// ---------------------------------------------------------------------------

/// GET /api/v1/scenic-admin/spots
pub async fn list_spots(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
) -> AppResult<Json<DataResponse<Vec<ScenicSpot>>>> {
    let spots = ScenicSpotRepo::list_for_admin(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: spots }))
}

/// Request body for creating a spot through the scenic-admin surface.
/// `admin_id` is always the caller, never taken from the body.
#[derive(Debug, Deserialize)]
pub struct CreateOwnSpotRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_path: Option<String>,
    pub address: String,
    pub opening_hours: Option<String>,
    pub is_hot: Option<bool>,
    pub region_id: DbId,
    pub category_id: DbId,
    pub tags: Option<String>,
}

/// POST /api/v1/scenic-admin/spots
pub async fn create_spot(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Json(input): Json<CreateOwnSpotRequest>,
) -> AppResult<(StatusCode, Json<ScenicSpot>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Spot name must not be empty".into(),
        )));
    }
    if input.price < Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "Price must not be negative".into(),
        )));
    }

    let spot = ScenicSpotRepo::create(
        &state.pool,
        &CreateScenicSpot {
            name: input.name,
            description: input.description,
            price: input.price,
            image_path: input.image_path,
            address: input.address,
            opening_hours: input.opening_hours.unwrap_or_default(),
            is_hot: input.is_hot,
            region_id: input.region_id,
            category_id: input.category_id,
            tags: input.tags,
            admin_id: Some(user.user_id),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(spot)))
}

/// PUT /api/v1/scenic-admin/spots/{id}
pub async fn update_spot(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScenicSpot>,
) -> AppResult<Json<ScenicSpot>> {
    let spot = ScenicSpotRepo::update(&state.pool, id, Some(user.user_id), &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id,
        }))?;
    Ok(Json(spot))
}

// ---------------------------------------------------------------------------
// Ticket types
// ---------------------------------------------------------------------------

/// GET /api/v1/scenic-admin/ticket-types
pub async fn list_ticket_types(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
) -> AppResult<Json<DataResponse<Vec<TicketType>>>> {
    let types = TicketTypeRepo::list_for_admin_spots(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: types }))
}

/// POST /api/v1/scenic-admin/ticket-types
pub async fn create_ticket_type(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Json(input): Json<CreateTicketType>,
) -> AppResult<(StatusCode, Json<TicketType>)> {
    if input.kind != KIND_SINGLE && input.kind != KIND_PACKAGE {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Ticket kind must be '{KIND_SINGLE}' or '{KIND_PACKAGE}'"
        ))));
    }
    if input.price < Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "Price must not be negative".into(),
        )));
    }
    if input.default_stock < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Default stock must not be negative".into(),
        )));
    }

    // The target spot must be the caller's.
    ScenicSpotRepo::find_owned(&state.pool, input.scenic_spot_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id: input.scenic_spot_id,
        }))?;

    let ticket_type = TicketTypeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(ticket_type)))
}

/// PUT /api/v1/scenic-admin/ticket-types/{id}
pub async fn update_ticket_type(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicketType>,
) -> AppResult<Json<TicketType>> {
    if let Some(kind) = &input.kind {
        if kind != KIND_SINGLE && kind != KIND_PACKAGE {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Ticket kind must be '{KIND_SINGLE}' or '{KIND_PACKAGE}'"
            ))));
        }
    }

    ensure_managed_ticket_type(&state, id, user.user_id).await?;

    let ticket_type = TicketTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket type",
            id,
        }))?;

    Ok(Json(ticket_type))
}

/// Request body for `PUT /ticket-types/{id}/date-stock`.
#[derive(Debug, Deserialize)]
pub struct SetDateStockRequest {
    pub date: NaiveDate,
    pub stock: i32,
}

/// PUT /api/v1/scenic-admin/ticket-types/{id}/date-stock
///
/// Set the remaining stock for a date, creating the ledger row if absent.
/// The `sold` counter is never edited here.
pub async fn set_date_stock(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetDateStockRequest>,
) -> AppResult<Json<DateStock>> {
    if input.stock < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Stock must not be negative".into(),
        )));
    }

    ensure_managed_ticket_type(&state, id, user.user_id).await?;

    let ledger = DateStockRepo::set_stock(&state.pool, id, input.date, input.stock).await?;
    Ok(Json(ledger))
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// GET /api/v1/scenic-admin/orders
pub async fn list_orders(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Query(filter): Query<OrderFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<OrderListing>>>> {
    let limit = clamp_limit(page.limit);
    let offset = clamp_offset(page.offset);

    let orders =
        OrderRepo::list(&state.pool, &filter, Some(user.user_id), limit, offset).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/scenic-admin/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderListing>> {
    let order = OrderRepo::find_listing(&state.pool, id, Some(user.user_id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;
    Ok(Json(order))
}

/// POST /api/v1/scenic-admin/orders/{id}/refund-approve
///
/// RefundPending -> Refunded. Records the refunded amount, stamps the audit
/// time, and returns the reserved quantity to the ledger exactly once.
pub async fn approve_refund(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Order>> {
    ensure_scoped_order(&state, id, user.user_id).await?;

    let order = OrderRepo::approve_refund(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only refund-pending orders can be approved".into(),
            ))
        })?;

    // The conditional approve above fired at most once, so the release
    // cannot double-credit stock.
    release_order_inventory(&state, &order).await?;

    Ok(Json(order))
}

/// POST /api/v1/scenic-admin/orders/{id}/refund-reject
///
/// RefundPending -> Paid. Stamps the audit time; inventory is untouched.
pub async fn reject_refund(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Order>> {
    ensure_scoped_order(&state, id, user.user_id).await?;

    let order = OrderRepo::reject_refund(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only refund-pending orders can be rejected".into(),
            ))
        })?;

    Ok(Json(order))
}

/// POST /api/v1/scenic-admin/orders/{id}/redeem
///
/// Paid -> Used, when the visitor shows up at the gate.
pub async fn redeem_order(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Order>> {
    ensure_scoped_order(&state, id, user.user_id).await?;

    let order = OrderRepo::transition(&state.pool, id, OrderStatus::Paid, OrderStatus::Used)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only paid orders can be redeemed".into(),
            ))
        })?;

    Ok(Json(order))
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/scenic-admin/comments
pub async fn list_comments(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Query(filter): Query<CommentFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<CommentListing>>>> {
    let limit = clamp_limit(page.limit);
    let offset = clamp_offset(page.offset);

    let comments =
        CommentRepo::list(&state.pool, &filter, Some(user.user_id), limit, offset).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// Request body for `POST /comments/{id}/reply`.
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub reply: String,
}

/// POST /api/v1/scenic-admin/comments/{id}/reply
pub async fn reply_comment(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ReplyRequest>,
) -> AppResult<Json<Comment>> {
    if input.reply.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Reply must not be empty".into(),
        )));
    }

    let comment = CommentRepo::reply(&state.pool, id, Some(user.user_id), input.reply.trim())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    Ok(Json(comment))
}

/// DELETE /api/v1/scenic-admin/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireScenicAdmin(user): RequireScenicAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = CommentRepo::delete(&state.pool, id, Some(user.user_id)).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 404 unless the ticket type sits under one of the caller's spots.
async fn ensure_managed_ticket_type(
    state: &AppState,
    ticket_type_id: DbId,
    admin_id: DbId,
) -> Result<(), AppError> {
    if !TicketTypeRepo::is_managed_by(&state.pool, ticket_type_id, admin_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Ticket type",
            id: ticket_type_id,
        }));
    }
    Ok(())
}

/// 404 unless the order targets one of the caller's spots.
async fn ensure_scoped_order(
    state: &AppState,
    order_id: DbId,
    admin_id: DbId,
) -> Result<(), AppError> {
    OrderRepo::find_listing(&state.pool, order_id, Some(admin_id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }))?;
    Ok(())
}
