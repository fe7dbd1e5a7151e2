//! Repository for the `comments` and `comment_reactions` tables.

use sqlx::PgPool;

use presswire_core::types::DbId;

use crate::models::comment::{Comment, CommentWithAuthor, NewComment, UserReaction};

/// Column list for bare `comments` queries.
const COLUMNS: &str = "\
    id, content_id, user_id, parent_comment_id, body, score, is_deleted, \
    created_at, updated_at";

/// Column list for author-joined listings (`c` = comments, `u` = users).
const JOINED_COLUMNS: &str = "\
    c.id, c.content_id, c.user_id, c.parent_comment_id, c.body, c.score, \
    c.created_at, u.username, u.display_name, u.avatar_url, u.role";

/// Provides CRUD and reaction operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment or reply.
    pub async fn insert(pool: &PgPool, input: &NewComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (content_id, user_id, parent_comment_id, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.content_id)
            .bind(input.user_id)
            .bind(input.parent_comment_id)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Top-level comments for a content item, newest first.
    pub async fn list_for_content(
        pool: &PgPool,
        content_id: DbId,
        limit: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.content_id = $1 AND c.parent_comment_id IS NULL AND NOT c.is_deleted \
             ORDER BY c.created_at DESC LIMIT $2"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(content_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Top-level comments for a content item, best score first.
    pub async fn list_for_content_by_score(
        pool: &PgPool,
        content_id: DbId,
        limit: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.content_id = $1 AND c.parent_comment_id IS NULL AND NOT c.is_deleted \
             ORDER BY c.score DESC, c.created_at DESC LIMIT $2"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(content_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Replies under a parent comment, oldest first.
    pub async fn list_replies(
        pool: &PgPool,
        parent_comment_id: DbId,
        limit: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.parent_comment_id = $1 AND NOT c.is_deleted \
             ORDER BY c.created_at ASC LIMIT $2"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(parent_comment_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Number of live replies under a parent comment.
    pub async fn reply_count(pool: &PgPool, parent_comment_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments \
             WHERE parent_comment_id = $1 AND NOT is_deleted",
        )
        .bind(parent_comment_id)
        .fetch_one(pool)
        .await
    }

    /// Number of live comments (including replies) on a content item.
    pub async fn count_for_content(pool: &PgPool, content_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE content_id = $1 AND NOT is_deleted",
        )
        .bind(content_id)
        .fetch_one(pool)
        .await
    }

    /// Soft-delete a comment. Returns `false` if it was already deleted or
    /// the id is unknown.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE comments SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Adjust a comment's score by `delta`.
    pub async fn adjust_score(pool: &PgPool, id: DbId, delta: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE comments SET score = score + $2 WHERE id = $1")
            .bind(id)
            .bind(delta)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// One user's reactions across all comments of a content item.
    pub async fn reactions_for_content(
        pool: &PgPool,
        content_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<UserReaction>, sqlx::Error> {
        sqlx::query_as::<_, UserReaction>(
            "SELECT r.comment_id, r.reaction FROM comment_reactions r \
             JOIN comments c ON c.id = r.comment_id \
             WHERE c.content_id = $1 AND r.user_id = $2",
        )
        .bind(content_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Set a user's reaction on a comment, returning the previous reaction
    /// if one existed.
    pub async fn upsert_reaction(
        pool: &PgPool,
        comment_id: DbId,
        user_id: DbId,
        reaction: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<String>>(
            "WITH prev AS ( \
                 SELECT reaction FROM comment_reactions \
                 WHERE comment_id = $1 AND user_id = $2 \
             ) \
             INSERT INTO comment_reactions (comment_id, user_id, reaction) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (comment_id, user_id) \
                 DO UPDATE SET reaction = EXCLUDED.reaction, created_at = NOW() \
             RETURNING (SELECT reaction FROM prev)",
        )
        .bind(comment_id)
        .bind(user_id)
        .bind(reaction)
        .fetch_one(pool)
        .await
    }

    /// Remove a user's reaction, returning what it was if one existed.
    pub async fn delete_reaction(
        pool: &PgPool,
        comment_id: DbId,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "DELETE FROM comment_reactions \
             WHERE comment_id = $1 AND user_id = $2 \
             RETURNING reaction",
        )
        .bind(comment_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
