//! Route definitions for the platform `/admin` surface (role 2 only).

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /dashboard                  -> platform-wide counters
/// GET    /users                      -> list + per-role counts
/// POST   /users                      -> create (any role)
/// PUT    /users/{id}                 -> update (incl. role)
/// DELETE /users/{id}                 -> soft-deactivate
/// POST   /users/{id}/reset-password  -> set a new password
/// POST   /regions, PUT/DELETE /regions/{id}
/// POST   /categories, PUT/DELETE /categories/{id}
/// GET/POST /spots, PUT/DELETE /spots/{id}
/// GET    /orders                     -> global listing + status counts
/// DELETE /orders/{id}
/// GET    /comments, POST /comments/{id}/reply, DELETE /comments/{id}
/// POST   /news, PUT/DELETE /news/{id}
/// GET/POST /carousels, DELETE /carousels/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            put(admin::update_user).delete(admin::deactivate_user),
        )
        .route("/users/{id}/reset-password", post(admin::reset_password))
        .route("/regions", post(admin::create_region))
        .route(
            "/regions/{id}",
            put(admin::update_region).delete(admin::delete_region),
        )
        .route("/categories", post(admin::create_category))
        .route(
            "/categories/{id}",
            put(admin::update_category).delete(admin::delete_category),
        )
        .route("/spots", get(admin::list_spots).post(admin::create_spot))
        .route(
            "/spots/{id}",
            put(admin::update_spot).delete(admin::deactivate_spot),
        )
        .route("/orders", get(admin::list_orders))
        .route("/orders/{id}", delete(admin::delete_order))
        .route("/comments", get(admin::list_comments))
        .route("/comments/{id}/reply", post(admin::reply_comment))
        .route("/comments/{id}", delete(admin::delete_comment))
        .route("/news", post(admin::create_news))
        .route(
            "/news/{id}",
            put(admin::update_news).delete(admin::delete_news),
        )
        .route(
            "/carousels",
            get(admin::list_carousels).post(admin::create_carousel),
        )
        .route("/carousels/{id}", delete(admin::delete_carousel))
}
