//! Route definitions for the `/collections` (favorites) resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::collections;
use crate::state::AppState;

/// Routes mounted at `/collections` (all require auth).
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(collections::list_collections).post(collections::add_collection),
        )
        .route("/{id}", delete(collections::remove_collection))
}
