//! Route definitions for the caller's own profile.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at the API root.
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(users::me).put(users::update_me))
}
