//! Cached user profile lookup.

use presswire_cache::{cache_key, DEFAULT_TTL};
use presswire_core::error::CoreError;
use presswire_core::types::DbId;
use presswire_db::models::user::UserProfile;
use presswire_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Profile snapshot for a user id, read through the cache.
///
/// The id comes from a verified token, never from a raw cookie or header
/// value, so the cache key space is bounded by real user ids.
pub async fn user_profile(state: &AppState, user_id: DbId) -> AppResult<UserProfile> {
    let key = cache_key("user", &[&user_id]);
    state
        .cache
        .fetch_with(&key, DEFAULT_TTL, || async {
            UserRepo::find_by_id(&state.pool, user_id)
                .await
                .map_err(AppError::from)?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: user_id,
                }))
        })
        .await
}
