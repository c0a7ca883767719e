//! Route definitions for the `/scenic-admin` surface (role 1, or 2).

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::scenic;
use crate::state::AppState;

/// Routes mounted at `/scenic-admin`, all scoped to the caller's spots.
///
/// ```text
/// GET  /dashboard                          -> counters + recent activity
/// GET  /spots                              -> own spots
/// POST /spots                              -> create (admin_id = caller)
/// PUT  /spots/{id}                         -> update (ownership enforced)
/// GET  /ticket-types                       -> ticket types across own spots
/// POST /ticket-types                       -> create under an owned spot
/// PUT  /ticket-types/{id}                  -> update
/// PUT  /ticket-types/{id}/date-stock       -> set per-date stock
/// GET  /orders                             -> scoped order listing
/// GET  /orders/{id}                        -> scoped order detail
/// POST /orders/{id}/refund-approve         -> refund + release inventory
/// POST /orders/{id}/refund-reject          -> back to paid
/// POST /orders/{id}/redeem                 -> paid -> used at the gate
/// GET  /comments                           -> scoped comment listing
/// POST /comments/{id}/reply                -> store the reply
/// DELETE /comments/{id}                    -> remove a comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(scenic::dashboard))
        .route("/spots", get(scenic::list_spots).post(scenic::create_spot))
        .route("/spots/{id}", put(scenic::update_spot))
        .route(
            "/ticket-types",
            get(scenic::list_ticket_types).post(scenic::create_ticket_type),
        )
        .route("/ticket-types/{id}", put(scenic::update_ticket_type))
        .route("/ticket-types/{id}/date-stock", put(scenic::set_date_stock))
        .route("/orders", get(scenic::list_orders))
        .route("/orders/{id}", get(scenic::get_order))
        .route("/orders/{id}/refund-approve", post(scenic::approve_refund))
        .route("/orders/{id}/refund-reject", post(scenic::reject_refund))
        .route("/orders/{id}/redeem", post(scenic::redeem_order))
        .route("/comments", get(scenic::list_comments))
        .route("/comments/{id}/reply", post(scenic::reply_comment))
        .route("/comments/{id}", delete(scenic::delete_comment))
}
