//! Route definitions for the public catalog (home, spots, lookups).

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET  /home                  -> home page aggregate
/// GET  /spots                 -> search / filter listing
/// GET  /spots/{id}            -> detail with ticket types and comments
/// GET  /spots/{id}/stocks     -> remaining stock for a date
/// GET  /spots/{id}/comments   -> comment listing
/// POST /spots/{id}/comments   -> post a comment (requires auth)
/// GET  /regions               -> lookup list
/// GET  /categories            -> lookup list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(catalog::home))
        .route("/spots", get(catalog::list_spots))
        .route("/spots/{id}", get(catalog::get_spot))
        .route("/spots/{id}/stocks", get(catalog::spot_stocks))
        .route(
            "/spots/{id}/comments",
            get(catalog::spot_comments).post(catalog::create_comment),
        )
        .route("/regions", get(catalog::list_regions))
        .route("/categories", get(catalog::list_categories))
}
