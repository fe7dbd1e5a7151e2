use std::sync::Arc;

use presswire_cache::CacheService;
use presswire_core::clock::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: presswire_db::DbPool,
    /// Cache service (Redis in production, in-memory in tests).
    pub cache: CacheService,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Time source. Handlers ask this for "today" on every call instead of
    /// caching a date at startup.
    pub clock: Arc<dyn Clock>,
}
