//! Route definitions for the visitor `/orders` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{checkout, orders};
use crate::state::AppState;

/// Routes mounted at `/orders` (all require auth).
///
/// ```text
/// GET  /               -> caller's orders (status filter, paginated)
/// POST /pay            -> batch simulated payment
/// GET  /{id}           -> order detail
/// POST /{id}/pay       -> simulated payment
/// POST /{id}/cancel    -> pending only, releases inventory
/// POST /{id}/refund    -> paid only, requests a refund
/// GET  /{id}/weather   -> weather advisory for the visit date
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list_orders))
        .route("/pay", post(checkout::pay_orders))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/pay", post(checkout::pay_order))
        .route("/{id}/cancel", post(orders::cancel_order))
        .route("/{id}/refund", post(orders::request_refund))
        .route("/{id}/weather", get(orders::order_weather))
}
