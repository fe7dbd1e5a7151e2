//! Repository for the `users` table.

use sqlx::PgPool;

use presswire_core::types::DbId;

use crate::models::user::{UpdateProfile, UserProfile};

/// Column list for `users` queries (public profile fields only).
const COLUMNS: &str = "\
    id, username, email, role, display_name, avatar_url, created_at";

/// Provides profile lookups and updates.
pub struct UserRepo;

impl UserRepo {
    /// Create a user account. Used by seed tooling and tests.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        role: &str,
    ) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, role, display_name) \
             VALUES ($1, $2, $3, $1) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(username)
            .bind(email)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find a user's profile by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Patch a user's editable profile fields. Returns `None` for an
    /// unknown id.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                 display_name = COALESCE($2, display_name), \
                 avatar_url = COALESCE($3, avatar_url), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .bind(input.display_name.as_deref())
            .bind(input.avatar_url.as_deref())
            .fetch_optional(pool)
            .await
    }
}
