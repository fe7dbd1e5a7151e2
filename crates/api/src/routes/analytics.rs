//! Route definitions for daily analytics.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/admin/analytics`.
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/daily", get(analytics::get_daily))
}

/// Routes mounted at `/analytics`.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/views", post(analytics::record_view))
}
