//! Handlers for the caller's own profile.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use presswire_core::error::CoreError;
use presswire_db::models::user::UpdateProfile;
use presswire_db::repositories::UserRepo;

use crate::cached;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /me`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 60, message = "Display name must be at most 60 characters."))]
    pub display_name: Option<String>,
    #[validate(length(max = 300, message = "Avatar URL must be at most 300 characters."))]
    pub avatar_url: Option<String>,
}

/// GET /api/v1/me
///
/// Profile snapshot for the token's user id, read through the cache.
pub async fn me(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = cached::users::user_profile(&state, user.user_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/me
///
/// Updates the caller's editable fields, then clears the `user*` and
/// `comments*` namespaces: comment listings embed author names and avatars.
pub async fn update_me(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    if let Err(errors) = input.validate() {
        let message = errors
            .field_errors()
            .into_values()
            .flatten()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "Invalid profile fields.".to_string());
        return Err(AppError::Core(CoreError::Validation(message)));
    }

    let changes = UpdateProfile {
        display_name: input.display_name,
        avatar_url: input.avatar_url,
    };
    let profile = UserRepo::update_profile(&state.pool, user.user_id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    state.cache.invalidate("user*").await;
    state.cache.invalidate("comments*").await;

    Ok(Json(DataResponse { data: profile }))
}
