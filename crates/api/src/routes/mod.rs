pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod collections;
pub mod health;
pub mod news;
pub mod orders;
pub mod profile;
pub mod scenic;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/change-password                change password (requires auth)
///
/// /profile                             get, update (requires auth)
///
/// /home                                landing page aggregate (public)
/// /spots                               search / filter listing (public)
/// /spots/{id}                          detail + ticket types + comments
/// /spots/{id}/stocks                   remaining stock for a date
/// /spots/{id}/comments                 list (public), create (auth)
/// /regions                             lookup list (public)
/// /categories                          lookup list (public)
/// /news                                list (public)
/// /news/{id}                           detail (public)
///
/// /cart                                list, add (auth)
/// /cart/{id}                           remove
/// /cart/{id}/collect                   move spot to favorites
/// /collections                         list, add (auth)
/// /collections/{id}                    remove
///
/// /checkout/buy-now                    reserve + create pending order
/// /checkout/cart                       convert cart lines, per-line results
///
/// /orders                              caller's orders (auth)
/// /orders/pay                          batch simulated payment
/// /orders/{id}                         detail
/// /orders/{id}/pay                     simulated payment
/// /orders/{id}/cancel                  pending only, releases inventory
/// /orders/{id}/refund                  paid only, requests a refund
/// /orders/{id}/weather                 weather advisory
///
/// /scenic-admin/...                    scenic admin surface (role 1 or 2)
/// /admin/...                           platform admin surface (role 2)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .merge(catalog::router())
        .nest("/news", news::router())
        .nest("/cart", cart::router())
        .nest("/collections", collections::router())
        .nest("/checkout", checkout::router())
        .nest("/orders", orders::router())
        .nest("/scenic-admin", scenic::router())
        .nest("/admin", admin::router())
}
