//! User profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use presswire_core::types::{DbId, Timestamp};

/// Public profile snapshot of a user account.
///
/// Serializes both ways because profiles are cached by user id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub display_name: String,
    pub avatar_url: String,
    pub created_at: Timestamp,
}

/// Patch DTO for profile updates; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}
