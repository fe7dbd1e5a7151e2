//! Role name constants shared by handlers and seed data.

/// Full moderation and ad-management access.
pub const ROLE_ADMIN: &str = "admin";

/// Regular reader account: may comment, react and edit its own profile.
pub const ROLE_USER: &str = "user";
