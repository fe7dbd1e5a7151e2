//! Key/value cache layer.
//!
//! The relational store is always authoritative; everything in here is an
//! optimization. Reads degrade to the loader when the cache is unreachable
//! and writes are best-effort, so a cache outage can slow the site down but
//! never break it.

pub mod key;
pub mod memory;
pub mod service;
pub mod store;

pub use key::cache_key;
pub use memory::MemoryStore;
pub use service::{CacheService, DEFAULT_TTL};
pub use store::{CacheError, CacheStore, RedisStore};
