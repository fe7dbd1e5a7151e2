//! Route definitions for ads.
//!
//! Admin routes require an admin token; the click beacon is public.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ads;
use crate::state::AppState;

/// Routes mounted at `/admin/ads`.
///
/// ```text
/// GET    /active            -> list_active
/// GET    /scheduled         -> list_scheduled
/// GET    /inactive          -> list_inactive
/// POST   /                  -> create_ad
/// GET    /{id}              -> get_ad
/// PUT    /{id}              -> update_ad
/// DELETE /{id}              -> delete_ad
/// POST   /{id}/deactivate   -> deactivate_ad
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(ads::create_ad))
        .route("/active", get(ads::list_active))
        .route("/scheduled", get(ads::list_scheduled))
        .route("/inactive", get(ads::list_inactive))
        .route(
            "/{id}",
            get(ads::get_ad).put(ads::update_ad).delete(ads::delete_ad),
        )
        .route("/{id}/deactivate", post(ads::deactivate_ad))
}

/// Routes mounted at `/ads`.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/{id}/click", post(ads::click_ad))
}
