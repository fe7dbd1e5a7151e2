//! Typed cache operations and the read-through helper.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{CacheError, CacheStore};

/// How long cached values live unless a caller picks otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Typed cache facade over a [`CacheStore`].
///
/// Values are serialized as JSON. Round-trip fidelity is all that matters
/// here; the format is not a contract with anything outside this process.
#[derive(Clone)]
pub struct CacheService {
    store: Arc<dyn CacheStore>,
}

impl CacheService {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Fetch and deserialize the value under `key`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store `value` under `key` for `ttl`.
    pub async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, bytes, ttl).await
    }

    /// Remove one key.
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key).await
    }

    /// Remove every key matching `pattern`, swallowing failures.
    ///
    /// A failed invalidation leaves stale entries behind; they age out at
    /// their TTL, and the store stays authoritative in the meantime.
    pub async fn invalidate(&self, pattern: &str) {
        match self.store.delete_by_pattern(pattern).await {
            Ok(removed) => {
                tracing::debug!(pattern, removed, "cache invalidated");
            }
            Err(err) => {
                tracing::warn!(pattern, error = %err, "cache invalidation failed");
            }
        }
    }

    /// Read-through lookup: return the cached value under `key`, or run
    /// `loader`, cache its result for `ttl`, and return it.
    ///
    /// Cache failures on either leg are logged and otherwise ignored -- a
    /// read never fails because the cache is unavailable. Loader errors
    /// propagate untouched.
    pub async fn fetch_with<T, F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.get_json::<T>(key).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => tracing::debug!(key, "cache miss"),
            Err(err) => tracing::warn!(key, error = %err, "cache read failed, treating as miss"),
        }

        let value = loader().await?;

        if let Err(err) = self.set_json(key, &value, ttl).await {
            tracing::warn!(key, error = %err, "failed to populate cache");
        }

        Ok(value)
    }
}
