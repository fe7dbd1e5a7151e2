//! Memoized read paths.
//!
//! Every lookup here is cache-aside: try the cache, fall back to Postgres,
//! repopulate on the way out. Writes elsewhere invalidate whole namespaces
//! (`comments*`, `user*`) rather than individual keys -- deliberately
//! coarse, so no stale comment or profile data can survive a write.

pub mod comments;
pub mod users;
