//! Route definitions for the `/checkout` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::checkout;
use crate::state::AppState;

/// Routes mounted at `/checkout` (all require auth).
///
/// ```text
/// POST /buy-now  -> reserve + create a single pending order
/// POST /cart     -> convert selected cart lines, per-line results
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/buy-now", post(checkout::buy_now))
        .route("/cart", post(checkout::cart_checkout))
}
