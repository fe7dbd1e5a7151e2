//! Comment entity models, reaction vocabulary and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use presswire_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub content_id: DbId,
    pub user_id: DbId,
    pub parent_comment_id: Option<DbId>,
    pub body: String,
    pub score: i64,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment joined with its author's public fields, as rendered in listings.
///
/// Serializes both ways because listings are cached.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub content_id: DbId,
    pub user_id: DbId,
    pub parent_comment_id: Option<DbId>,
    pub body: String,
    pub score: i64,
    pub created_at: Timestamp,
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
    pub role: String,
}

/// A user's reaction to one comment, as loaded for the per-content map.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserReaction {
    pub comment_id: DbId,
    pub reaction: String,
}

/// Insert parameters for a new comment or reply.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content_id: DbId,
    pub user_id: DbId,
    pub parent_comment_id: Option<DbId>,
    pub body: String,
}

/// A reaction a user can leave on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reaction::Like => "like",
            Reaction::Dislike => "dislike",
        }
    }

    /// Score contribution of this reaction.
    pub fn score_delta(&self) -> i64 {
        match self {
            Reaction::Like => 1,
            Reaction::Dislike => -1,
        }
    }
}

impl std::str::FromStr for Reaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Reaction::Like),
            "dislike" => Ok(Reaction::Dislike),
            other => Err(format!("unknown reaction: {other}")),
        }
    }
}
