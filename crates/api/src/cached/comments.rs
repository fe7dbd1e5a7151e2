//! Cached comment lookups.

use std::collections::HashMap;

use presswire_cache::{cache_key, DEFAULT_TTL};
use presswire_core::roles::ROLE_ADMIN;
use presswire_core::types::DbId;
use presswire_db::models::comment::CommentWithAuthor;
use presswire_db::repositories::CommentRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// How many replies the admin-reply scan reads at most.
const ADMIN_SCAN_LIMIT: i64 = 10_000;

/// Reply metadata rendered next to each top-level comment.
#[derive(Debug, Clone)]
pub struct ReplyMeta {
    pub reply_count: i64,
    /// Avatar of the first admin reply, if any admin has replied.
    pub admin_avatar: Option<String>,
}

/// Top-level comments for a content item, newest first.
pub async fn list_comments(
    state: &AppState,
    content_id: DbId,
    limit: i64,
) -> AppResult<Vec<CommentWithAuthor>> {
    let key = cache_key("comments", &[&content_id, &limit]);
    state
        .cache
        .fetch_with(&key, DEFAULT_TTL, || async {
            CommentRepo::list_for_content(&state.pool, content_id, limit)
                .await
                .map_err(Into::into)
        })
        .await
}

/// Top-level comments for a content item, best score first.
pub async fn list_comments_by_score(
    state: &AppState,
    content_id: DbId,
    limit: i64,
) -> AppResult<Vec<CommentWithAuthor>> {
    let key = cache_key("comments_by_score", &[&content_id, &limit]);
    state
        .cache
        .fetch_with(&key, DEFAULT_TTL, || async {
            CommentRepo::list_for_content_by_score(&state.pool, content_id, limit)
                .await
                .map_err(Into::into)
        })
        .await
}

/// Replies under a parent comment, oldest first.
pub async fn list_replies(
    state: &AppState,
    parent_comment_id: DbId,
    limit: i64,
) -> AppResult<Vec<CommentWithAuthor>> {
    let key = cache_key("comments_replies", &[&parent_comment_id, &limit]);
    state
        .cache
        .fetch_with(&key, DEFAULT_TTL, || async {
            CommentRepo::list_replies(&state.pool, parent_comment_id, limit)
                .await
                .map_err(Into::into)
        })
        .await
}

/// Number of live comments on a content item.
pub async fn comment_count(state: &AppState, content_id: DbId) -> AppResult<i64> {
    let key = cache_key("comments_count", &[&content_id]);
    state
        .cache
        .fetch_with(&key, DEFAULT_TTL, || async {
            CommentRepo::count_for_content(&state.pool, content_id)
                .await
                .map_err(Into::into)
        })
        .await
}

/// The calling user's reactions across a content item's comments, keyed by
/// comment id.
pub async fn reaction_map(
    state: &AppState,
    content_id: DbId,
    user_id: DbId,
) -> AppResult<HashMap<String, String>> {
    let key = cache_key("comments_user_reactions", &[&content_id, &user_id]);
    state
        .cache
        .fetch_with(&key, DEFAULT_TTL, || async {
            let reactions =
                CommentRepo::reactions_for_content(&state.pool, content_id, user_id).await?;
            Ok(reactions
                .into_iter()
                .map(|r| (r.comment_id.to_string(), r.reaction))
                .collect())
        })
        .await
}

/// Reply count plus admin-reply marker for one parent comment.
///
/// The admin scan walks every reply, so its outcome is cached separately
/// under a boolean "checked" key: once a comment is known to have no admin
/// reply, listing it again does not trigger another scan. The avatar itself
/// is cached under a third key and rescanned only if it has expired while
/// the checked flag survives.
pub async fn reply_meta(state: &AppState, parent_comment_id: DbId) -> AppResult<ReplyMeta> {
    let count_key = cache_key("comments_reply_count", &[&parent_comment_id]);
    let checked_key = cache_key("comments_checked_admin_replies", &[&parent_comment_id]);
    let avatar_key = cache_key("comments_admin_pfp", &[&parent_comment_id]);

    let reply_count = state
        .cache
        .fetch_with(&count_key, DEFAULT_TTL, || async {
            CommentRepo::reply_count(&state.pool, parent_comment_id)
                .await
                .map_err(crate::error::AppError::from)
        })
        .await?;

    let checked = match state.cache.get_json::<bool>(&checked_key).await {
        Ok(hit) => hit,
        Err(err) => {
            tracing::warn!(key = %checked_key, error = %err, "cache read failed, treating as miss");
            None
        }
    };

    let admin_avatar = match checked {
        Some(true) => {
            match state.cache.get_json::<String>(&avatar_key).await {
                Ok(Some(avatar)) if !avatar.is_empty() => Some(avatar),
                // The avatar key expired ahead of the checked flag; rescan.
                _ => scan_for_admin_avatar(state, parent_comment_id, &avatar_key).await,
            }
        }
        Some(false) => None,
        None => {
            let avatar = scan_for_admin_avatar(state, parent_comment_id, &avatar_key).await;
            let has_admin_reply = avatar.is_some();
            if let Err(err) = state
                .cache
                .set_json(&checked_key, &has_admin_reply, DEFAULT_TTL)
                .await
            {
                tracing::warn!(key = %checked_key, error = %err, "failed to cache admin-reply flag");
            }
            avatar
        }
    };

    Ok(ReplyMeta {
        reply_count,
        admin_avatar,
    })
}

/// Walk all replies looking for one by an admin; cache and return its
/// avatar when found.
///
/// A database failure here only degrades the admin marker, so it is logged
/// and reported as "no admin reply" rather than failing the listing.
async fn scan_for_admin_avatar(
    state: &AppState,
    parent_comment_id: DbId,
    avatar_key: &str,
) -> Option<String> {
    let replies =
        match CommentRepo::list_replies(&state.pool, parent_comment_id, ADMIN_SCAN_LIMIT).await {
            Ok(replies) => replies,
            Err(err) => {
                tracing::error!(
                    parent_comment_id = %parent_comment_id,
                    error = %err,
                    "failed to scan replies for an admin"
                );
                return None;
            }
        };

    let avatar = replies
        .into_iter()
        .find(|r| r.role == ROLE_ADMIN)
        .map(|r| r.avatar_url)
        .filter(|a| !a.is_empty())?;
    if let Err(err) = state.cache.set_json(avatar_key, &avatar, DEFAULT_TTL).await {
        tracing::warn!(key = %avatar_key, error = %err, "failed to cache admin avatar");
    }
    Some(avatar)
}
