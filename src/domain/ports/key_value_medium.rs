//! Key-value medium port - the raw persistent string store.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Flat, origin-scoped key-value medium holding serialized text.
///
/// This is the persistence primitive beneath `KeyValueStore`. Implementations
/// may be synchronous under the hood; the async contract lets network-backed
/// media be substituted without touching call sites.
///
/// There is no concurrency control: concurrent writers to the same key race
/// and the last write wins.
#[async_trait]
pub trait KeyValueMedium: Send + Sync {
    /// Medium type name, used in logs.
    fn name(&self) -> &'static str;

    /// Read the raw value stored under `key`.
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Write `value` under `key`, overwriting silently.
    ///
    /// # Errors
    /// Returns `DomainError::Storage` if the medium rejects the write
    /// (for example when a quota is exceeded).
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> DomainResult<()>;

    /// Every key currently held by the medium, across all namespaces.
    /// Order is unspecified.
    async fn keys(&self) -> DomainResult<Vec<String>>;
}
