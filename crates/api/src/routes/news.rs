//! Route definitions for the public `/news` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list_news))
        .route("/{id}", get(news::get_news))
}
