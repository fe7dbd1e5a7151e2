//! Route definitions for comments, replies and reactions.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// GET  /{id}/comments   -> list_comments (public)
/// POST /{id}/comments   -> post_comment  (auth)
/// ```
pub fn content_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/comments",
        get(comments::list_comments).post(comments::post_comment),
    )
}

/// Routes mounted at `/comments`.
///
/// ```text
/// GET    /{id}/replies    -> list_replies (public)
/// POST   /{id}/replies    -> post_reply   (auth)
/// DELETE /{id}            -> delete_comment
/// PUT    /{id}/reaction   -> set_reaction
/// DELETE /{id}/reaction   -> clear_reaction
/// ```
pub fn comment_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/replies",
            get(comments::list_replies).post(comments::post_reply),
        )
        .route("/{id}", delete(comments::delete_comment))
        .route(
            "/{id}/reaction",
            put(comments::set_reaction).delete(comments::clear_reaction),
        )
}
