//! Route tree.

pub mod ads;
pub mod analytics;
pub mod comments;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/ads/active                      list derived-active ads
/// /admin/ads/scheduled                   list derived-scheduled ads
/// /admin/ads/inactive                    list inactive ads
/// /admin/ads                             create (POST)
/// /admin/ads/{id}                        get, update (PUT), delete
/// /admin/ads/{id}/deactivate             deactivate (POST)
/// /admin/analytics/daily                 counters for a date range
///
/// /ads/{id}/click                        public click beacon (POST)
/// /analytics/views                       public view beacon (POST)
///
/// /content/{id}/comments                 list (public), post (auth)
/// /comments/{id}/replies                 list (public), post (auth)
/// /comments/{id}                         delete own/any (auth)
/// /comments/{id}/reaction                set (PUT), clear (DELETE)
///
/// /me                                    profile get, update (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin/ads", ads::admin_router())
        .nest("/ads", ads::public_router())
        .nest("/admin/analytics", analytics::admin_router())
        .nest("/analytics", analytics::public_router())
        .nest("/content", comments::content_router())
        .nest("/comments", comments::comment_router())
        .merge(users::router())
}
