//! Handlers for comments, replies and reactions.
//!
//! Reads go through the cached lookups in [`crate::cached::comments`].
//! Every write invalidates the whole `comments*` namespace before
//! returning -- coarse on purpose, so no listing can serve stale data --
//! and bumps the matching daily counter.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use presswire_core::error::CoreError;
use presswire_core::types::DbId;
use presswire_db::models::analytics::DailyCounter;
use presswire_db::models::comment::{CommentWithAuthor, NewComment, Reaction};
use presswire_db::repositories::{CommentRepo, DailyAnalyticsRepo};

use crate::cached;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for comment listings.
const MAX_LIMIT: i64 = 100;

/// Default page size for comment listings.
const DEFAULT_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Query parameters for comment listings.
#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub limit: Option<i64>,
    /// `recent` (default) or `score`.
    pub sort: Option<String>,
}

/// Request body for posting a comment or reply.
#[derive(Debug, Deserialize, Validate)]
pub struct PostCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "A comment must be 1 to 2000 characters."))]
    pub body: String,
}

/// Request body for setting a reaction.
#[derive(Debug, Deserialize)]
pub struct ReactionRequest {
    pub reaction: String,
}

/// One comment as rendered in a listing, with its reply metadata.
#[derive(Debug, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: CommentWithAuthor,
    pub reply_count: i64,
    pub has_admin_reply: bool,
    pub admin_avatar: Option<String>,
}

/// Response for `GET /content/{id}/comments`.
#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentView>,
    pub total: i64,
    /// The calling user's reaction per comment id; empty when anonymous.
    pub user_reactions: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/content/{id}/comments
///
/// Public. When called with a valid token the response carries the caller's
/// reaction map so the UI can highlight their votes.
pub async fn list_comments(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
    Query(query): Query<CommentListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let comments = match query.sort.as_deref() {
        Some("score") => cached::comments::list_comments_by_score(&state, content_id, limit).await?,
        _ => cached::comments::list_comments(&state, content_id, limit).await?,
    };

    let mut views = Vec::with_capacity(comments.len());
    for comment in comments {
        let meta = cached::comments::reply_meta(&state, comment.id).await?;
        views.push(CommentView {
            comment,
            reply_count: meta.reply_count,
            has_admin_reply: meta.admin_avatar.is_some(),
            admin_avatar: meta.admin_avatar,
        });
    }

    let total = cached::comments::comment_count(&state, content_id).await?;

    let user_reactions = match &user {
        Some(user) => cached::comments::reaction_map(&state, content_id, user.user_id).await?,
        None => HashMap::new(),
    };

    Ok(Json(CommentListResponse {
        comments: views,
        total,
        user_reactions,
    }))
}

/// GET /api/v1/comments/{id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
    Query(query): Query<CommentListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let replies = cached::comments::list_replies(&state, comment_id, limit).await?;
    Ok(Json(DataResponse { data: replies }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/content/{id}/comments
pub async fn post_comment(
    user: AuthUser,
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
    Json(input): Json<PostCommentRequest>,
) -> AppResult<impl IntoResponse> {
    validate_body(&input)?;

    let comment = CommentRepo::insert(
        &state.pool,
        &NewComment {
            content_id,
            user_id: user.user_id,
            parent_comment_id: None,
            body: input.body,
        },
    )
    .await?;

    state.cache.invalidate("comments*").await;
    DailyAnalyticsRepo::bump(&state.pool, state.clock.today(), DailyCounter::Comments, 1).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// POST /api/v1/comments/{id}/replies
///
/// Replies attach to top-level comments only; one level of nesting.
pub async fn post_reply(
    user: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
    Json(input): Json<PostCommentRequest>,
) -> AppResult<impl IntoResponse> {
    validate_body(&input)?;

    let parent = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;
    if parent.parent_comment_id.is_some() {
        return Err(AppError::Core(CoreError::Validation(
            "Replies cannot be nested.".into(),
        )));
    }

    let reply = CommentRepo::insert(
        &state.pool,
        &NewComment {
            content_id: parent.content_id,
            user_id: user.user_id,
            parent_comment_id: Some(parent.id),
            body: input.body,
        },
    )
    .await?;

    state.cache.invalidate("comments*").await;
    DailyAnalyticsRepo::bump(&state.pool, state.clock.today(), DailyCounter::Comments, 1).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: reply })))
}

/// DELETE /api/v1/comments/{id}
///
/// Authors may delete their own comments; admins may delete any.
pub async fn delete_comment(
    user: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let comment = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;

    if comment.user_id != user.user_id && !user.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot delete another user's comment".into(),
        )));
    }

    if CommentRepo::soft_delete(&state.pool, comment_id).await? {
        state.cache.invalidate("comments*").await;
        DailyAnalyticsRepo::bump(&state.pool, state.clock.today(), DailyCounter::Comments, -1)
            .await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/comments/{id}/reaction
///
/// Sets or switches the caller's like/dislike. Daily counters follow the
/// transition: a switch decrements the old counter and increments the new
/// one; repeating the same reaction is a no-op.
pub async fn set_reaction(
    user: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
    Json(input): Json<ReactionRequest>,
) -> AppResult<impl IntoResponse> {
    let reaction: Reaction = input
        .reaction
        .parse()
        .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?;

    let comment = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;

    let previous =
        CommentRepo::upsert_reaction(&state.pool, comment.id, user.user_id, reaction.as_str())
            .await?;
    let previous: Option<Reaction> = previous.as_deref().and_then(|p| p.parse().ok());

    if previous != Some(reaction) {
        let today = state.clock.today();
        if let Some(prev) = previous {
            DailyAnalyticsRepo::bump(&state.pool, today, counter_for(prev), -1).await?;
            CommentRepo::adjust_score(&state.pool, comment.id, -prev.score_delta()).await?;
        }
        DailyAnalyticsRepo::bump(&state.pool, today, counter_for(reaction), 1).await?;
        CommentRepo::adjust_score(&state.pool, comment.id, reaction.score_delta()).await?;
    }

    state.cache.invalidate("comments*").await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/comments/{id}/reaction
pub async fn clear_reaction(
    user: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = CommentRepo::delete_reaction(&state.pool, comment_id, user.user_id).await?;

    if let Some(removed) = removed.as_deref().and_then(|r| r.parse::<Reaction>().ok()) {
        DailyAnalyticsRepo::bump(
            &state.pool,
            state.clock.today(),
            counter_for(removed),
            -1,
        )
        .await?;
        CommentRepo::adjust_score(&state.pool, comment_id, -removed.score_delta()).await?;
        state.cache.invalidate("comments*").await;
    }

    Ok(StatusCode::NO_CONTENT)
}

fn counter_for(reaction: Reaction) -> DailyCounter {
    match reaction {
        Reaction::Like => DailyCounter::Likes,
        Reaction::Dislike => DailyCounter::Dislikes,
    }
}

fn validate_body(input: &PostCommentRequest) -> AppResult<()> {
    if let Err(errors) = input.validate() {
        let message = errors
            .field_errors()
            .into_values()
            .flatten()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "Invalid comment.".to_string());
        return Err(AppError::Core(CoreError::Validation(message)));
    }
    Ok(())
}
