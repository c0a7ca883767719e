//! Route definitions for the `/profile` resource (personal center).

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(profile::get_profile).put(profile::update_profile))
}
