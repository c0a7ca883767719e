//! Route definitions for the `/cart` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/cart` (all require auth).
///
/// ```text
/// GET    /               -> list cart lines
/// POST   /               -> add line (merges duplicates)
/// DELETE /{id}           -> remove line
/// POST   /{id}/collect   -> move line's spot to favorites
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::list_cart).post(cart::add_to_cart))
        .route("/{id}", delete(cart::remove_from_cart))
        .route("/{id}/collect", post(cart::collect_cart_item))
}
