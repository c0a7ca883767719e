//! Checkout and payment handlers.
//!
//! Inventory is reserved at order creation, for buy-now and cart checkout
//! alike. The reservation is a single conditional update in the ledger, so
//! overselling cannot happen no matter how many checkouts race. Payment is
//! a simulated gateway and never touches inventory.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trekpass_core::error::CoreError;
use trekpass_core::order::{generate_order_number, OrderStatus};
use trekpass_core::types::DbId;
use trekpass_db::models::date_stock::ReserveOutcome;
use trekpass_db::models::order::{CreateOrder, Order};
use trekpass_db::models::ticket_type::TicketType;
use trekpass_db::repositories::{
    CartRepo, DateStockRepo, OrderRepo, RegionRepo, ScenicSpotRepo, TicketTypeRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::weather::Forecast;

/// Attempts at regenerating a colliding order number before giving up.
const ORDER_NUMBER_RETRIES: usize = 3;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /checkout/buy-now`.
#[derive(Debug, Deserialize)]
pub struct BuyNowRequest {
    pub scenic_spot_id: DbId,
    pub ticket_type_id: DbId,
    pub use_date: NaiveDate,
    pub quantity: i32,
}

/// Request body for `POST /checkout/cart`.
#[derive(Debug, Deserialize)]
pub struct CartCheckoutRequest {
    pub cart_item_ids: Vec<DbId>,
}

/// Per-line outcome of a cart checkout. Failed lines stay in the cart.
#[derive(Debug, Serialize)]
pub struct CartLineResult {
    pub cart_item_id: DbId,
    pub order: Option<Order>,
    pub error: Option<String>,
}

/// Response body for `POST /checkout/cart`.
#[derive(Debug, Serialize)]
pub struct CartCheckoutResponse {
    pub results: Vec<CartLineResult>,
}

/// Request body for `POST /orders/pay` (batch payment).
#[derive(Debug, Deserialize)]
pub struct BatchPayRequest {
    pub order_ids: Vec<DbId>,
}

/// Response body for single payment: the paid order plus an optional
/// weather advisory for the visit date.
#[derive(Debug, Serialize)]
pub struct PayResponse {
    pub order: Order,
    pub weather: Option<Forecast>,
}

/// Response body for batch payment.
#[derive(Debug, Serialize)]
pub struct BatchPayResponse {
    pub paid: Vec<Order>,
    /// Order ids that were not in Pending status (or not the caller's).
    pub skipped: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/checkout/buy-now
///
/// Reserve inventory and create a Pending order in one step.
pub async fn buy_now(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<BuyNowRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    validate_purchase(input.quantity, input.use_date)?;

    let ticket_type = load_active_ticket_type(
        &state,
        input.scenic_spot_id,
        input.ticket_type_id,
    )
    .await?;

    let order = reserve_and_create_order(
        &state,
        auth_user.user_id,
        &ticket_type,
        input.use_date,
        input.quantity,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// POST /api/v1/checkout/cart
///
/// Convert selected cart lines into Pending orders. Each line reserves
/// independently; a failed line is reported and stays in the cart, and
/// never rolls back its siblings.
pub async fn cart_checkout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CartCheckoutRequest>,
) -> AppResult<Json<CartCheckoutResponse>> {
    if input.cart_item_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No cart items selected".into(),
        )));
    }

    let mut results = Vec::with_capacity(input.cart_item_ids.len());

    for cart_item_id in input.cart_item_ids {
        let outcome = checkout_cart_line(&state, auth_user.user_id, cart_item_id).await;
        results.push(match outcome {
            Ok(order) => CartLineResult {
                cart_item_id,
                order: Some(order),
                error: None,
            },
            Err(e) => CartLineResult {
                cart_item_id,
                order: None,
                error: Some(e.to_string()),
            },
        });
    }

    Ok(Json(CartCheckoutResponse { results }))
}

/// POST /api/v1/orders/{id}/pay
///
/// Simulated payment: Pending -> Paid. Returns the order with a weather
/// advisory for the visit date when the lookup succeeds.
pub async fn pay_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<PayResponse>> {
    let order = OrderRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    let paid = OrderRepo::transition(&state.pool, order.id, OrderStatus::Pending, OrderStatus::Paid)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only pending orders can be paid".into(),
            ))
        })?;

    let weather = forecast_for_order(&state, &paid).await;

    Ok(Json(PayResponse {
        order: paid,
        weather,
    }))
}

/// POST /api/v1/orders/pay
///
/// Batch payment. Non-pending or foreign orders are skipped and reported,
/// never failing the batch.
pub async fn pay_orders(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<BatchPayRequest>,
) -> AppResult<Json<BatchPayResponse>> {
    if input.order_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No orders selected".into(),
        )));
    }

    let mut paid = Vec::new();
    let mut skipped = Vec::new();

    for id in input.order_ids {
        let owned = OrderRepo::find_for_user(&state.pool, id, auth_user.user_id).await?;
        if owned.is_none() {
            skipped.push(id);
            continue;
        }

        match OrderRepo::transition(&state.pool, id, OrderStatus::Pending, OrderStatus::Paid)
            .await?
        {
            Some(order) => paid.push(order),
            None => skipped.push(id),
        }
    }

    Ok(Json(BatchPayResponse { paid, skipped }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_purchase(quantity: i32, use_date: NaiveDate) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Quantity must be at least 1".into(),
        )));
    }
    if use_date < Utc::now().date_naive() {
        return Err(AppError::Core(CoreError::Validation(
            "Use date must not be in the past".into(),
        )));
    }
    Ok(())
}

/// Resolve an active ticket type under an active spot, or 404.
async fn load_active_ticket_type(
    state: &AppState,
    scenic_spot_id: DbId,
    ticket_type_id: DbId,
) -> Result<TicketType, AppError> {
    ScenicSpotRepo::find_by_id(&state.pool, scenic_spot_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenic spot",
            id: scenic_spot_id,
        }))?;

    TicketTypeRepo::find_by_id(&state.pool, ticket_type_id)
        .await?
        .filter(|t| t.scenic_spot_id == scenic_spot_id && t.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket type",
            id: ticket_type_id,
        }))
}

/// Reserve inventory for one purchase and create the Pending order.
///
/// If the order insert fails after the reservation succeeded, the
/// reservation is released so inventory cannot leak.
async fn reserve_and_create_order(
    state: &AppState,
    user_id: DbId,
    ticket_type: &TicketType,
    use_date: NaiveDate,
    quantity: i32,
) -> Result<Order, AppError> {
    let ledger = DateStockRepo::get_or_create(
        &state.pool,
        ticket_type.id,
        use_date,
        ticket_type.default_stock,
    )
    .await?;

    match DateStockRepo::reserve(&state.pool, ledger.id, quantity).await? {
        ReserveOutcome::Reserved => {}
        ReserveOutcome::InsufficientStock => {
            return Err(AppError::Core(CoreError::Conflict(
                "Not enough tickets left for this date".into(),
            )));
        }
    }

    let total_price = ticket_type.price * Decimal::from(quantity);

    match insert_order_with_retry(state, user_id, ticket_type, use_date, quantity, total_price)
        .await
    {
        Ok(order) => Ok(order),
        Err(e) => {
            if !DateStockRepo::release(&state.pool, ledger.id, quantity).await? {
                tracing::error!(
                    ledger_id = ledger.id,
                    quantity,
                    "Failed to release reservation after order insert error"
                );
            }
            Err(e)
        }
    }
}

/// Insert the order, regenerating the order number on the rare collision.
async fn insert_order_with_retry(
    state: &AppState,
    user_id: DbId,
    ticket_type: &TicketType,
    use_date: NaiveDate,
    quantity: i32,
    total_price: Decimal,
) -> Result<Order, AppError> {
    let mut last_err: Option<sqlx::Error> = None;

    for _ in 0..ORDER_NUMBER_RETRIES {
        let input = CreateOrder {
            user_id,
            scenic_spot_id: ticket_type.scenic_spot_id,
            ticket_type_id: ticket_type.id,
            use_date,
            quantity,
            total_price,
            order_number: generate_order_number(),
        };

        match OrderRepo::create(&state.pool, &input).await {
            Ok(order) => return Ok(order),
            Err(e) if is_order_number_collision(&e) => last_err = Some(e),
            Err(e) => return Err(e.into()),
        }
    }

    Err(last_err
        .map(AppError::from)
        .unwrap_or_else(|| AppError::InternalError("Order insert failed".into())))
}

fn is_order_number_collision(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db)
        if db.code().as_deref() == Some("23505")
            && db.constraint() == Some("uq_orders_order_number"))
}

/// Convert one cart line into an order. Validation mirrors buy-now; the
/// line is deleted only after the order exists.
async fn checkout_cart_line(
    state: &AppState,
    user_id: DbId,
    cart_item_id: DbId,
) -> Result<Order, AppError> {
    let line = CartRepo::find_for_user(&state.pool, cart_item_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Cart item",
            id: cart_item_id,
        }))?;

    validate_purchase(line.quantity, line.use_date)?;

    let ticket_type =
        load_active_ticket_type(state, line.scenic_spot_id, line.ticket_type_id).await?;

    let order =
        reserve_and_create_order(state, user_id, &ticket_type, line.use_date, line.quantity)
            .await?;

    CartRepo::delete_for_user(&state.pool, cart_item_id, user_id).await?;

    Ok(order)
}

/// Weather advisory for an order's spot region and visit date. All failures
/// degrade to `None`.
pub(crate) async fn forecast_for_order(state: &AppState, order: &Order) -> Option<Forecast> {
    let spot = ScenicSpotRepo::find_by_id(&state.pool, order.scenic_spot_id)
        .await
        .ok()??;
    let region = RegionRepo::find_by_id(&state.pool, spot.region_id)
        .await
        .ok()??;
    state.weather.forecast(&region.name, order.use_date).await
}
