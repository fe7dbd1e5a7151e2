//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the `Deserialize` DTOs its repository accepts.

pub mod ad;
pub mod analytics;
pub mod comment;
pub mod user;
