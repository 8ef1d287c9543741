//! Key-value store trait for pluggable persistence backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Byte-oriented key-value backend with string keys.
///
/// Values never expire. Absence of a key is reported as `Ok(None)`, which
/// callers keep distinct from a stored value.
#[async_trait]
pub trait KvStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get the raw bytes stored under `key`.
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> AppResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
