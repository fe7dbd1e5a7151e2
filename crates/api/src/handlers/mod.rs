//! HTTP handlers, one module per resource.

pub mod ads;
pub mod analytics;
pub mod comments;
pub mod health;
pub mod users;
