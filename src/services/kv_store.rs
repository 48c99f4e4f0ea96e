//! Prefix-namespaced typed store over a raw key-value medium.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::StoredValue;
use crate::domain::ports::KeyValueMedium;

/// On-medium representation of a stored value.
#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    schema: &'a str,
    version: u32,
    namespace: &'a str,
    value: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    schema: String,
    version: u32,
    namespace: String,
    value: serde_json::Value,
}

/// Typed key-value store owning one namespace of a shared medium.
///
/// Keys are written as `<prefix>-<key>`. Values are wrapped in an envelope
/// tagged with the value's schema, version and the store's namespace. Reads
/// fail closed: a malformed or mismatched entry is treated as absent and
/// logged, never propagated.
pub struct KeyValueStore<M: KeyValueMedium> {
    medium: Arc<M>,
    prefix: String,
}

impl<M: KeyValueMedium> KeyValueStore<M> {
    pub fn new(medium: Arc<M>, prefix: impl Into<String>) -> Self {
        Self {
            medium,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The shared medium beneath this store.
    pub fn medium(&self) -> &Arc<M> {
        &self.medium
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}-{}", self.prefix, key)
    }

    /// Serialize `value` and write it under `prefix-key`, overwriting silently.
    ///
    /// # Errors
    /// Propagates `DomainError::Storage` when the medium rejects the write.
    pub async fn set_item<T: StoredValue>(&self, key: &str, value: &T) -> DomainResult<()> {
        let envelope = EnvelopeRef {
            schema: T::SCHEMA,
            version: T::VERSION,
            namespace: &self.prefix,
            value,
        };
        let serialized = serde_json::to_string(&envelope)?;
        let storage_key = self.storage_key(key);

        self.medium.set(&storage_key, &serialized).await?;
        debug!(key = %storage_key, medium = self.medium.name(), "stored item");
        Ok(())
    }

    /// Read the value under `prefix-key`.
    ///
    /// Returns `None` when the key is absent or its entry cannot be decoded
    /// as `T`.
    pub async fn get_item<T: StoredValue>(&self, key: &str) -> DomainResult<Option<T>> {
        let storage_key = self.storage_key(key);
        let Some(raw) = self.medium.get(&storage_key).await? else {
            return Ok(None);
        };
        Ok(self.decode(&storage_key, &raw))
    }

    /// Every decodable value in this namespace. Order is unspecified.
    pub async fn get_all_items<T: StoredValue>(&self) -> DomainResult<Vec<T>> {
        let key_prefix = format!("{}-", self.prefix);
        let mut items = Vec::new();

        for storage_key in self.medium.keys().await? {
            if !storage_key.starts_with(&key_prefix) {
                continue;
            }
            // Removed between listing and reading
            let Some(raw) = self.medium.get(&storage_key).await? else {
                continue;
            };
            if let Some(item) = self.decode(&storage_key, &raw) {
                items.push(item);
            }
        }

        Ok(items)
    }

    /// Delete `prefix-key`; absent keys are a no-op.
    pub async fn remove_item(&self, key: &str) -> DomainResult<()> {
        let storage_key = self.storage_key(key);
        self.medium.remove(&storage_key).await?;
        debug!(key = %storage_key, "removed item");
        Ok(())
    }

    fn decode<T: StoredValue>(&self, storage_key: &str, raw: &str) -> Option<T> {
        let envelope: Envelope = match serde_json::from_str(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(key = %storage_key, error = %e, "skipping malformed stored entry");
                return None;
            }
        };

        // A longer prefix sharing our key prefix (`a` vs `a-b`) lands here
        if envelope.namespace != self.prefix {
            debug!(key = %storage_key, namespace = %envelope.namespace, "entry belongs to another namespace");
            return None;
        }

        if envelope.schema != T::SCHEMA || envelope.version != T::VERSION {
            warn!(
                key = %storage_key,
                schema = %envelope.schema,
                version = envelope.version,
                expected_schema = T::SCHEMA,
                expected_version = T::VERSION,
                "skipping stored entry with mismatched schema"
            );
            return None;
        }

        match serde_json::from_value(envelope.value) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %storage_key, error = %e, "skipping undecodable stored value");
                None
            }
        }
    }
}

impl<M: KeyValueMedium> Clone for KeyValueStore<M> {
    fn clone(&self) -> Self {
        Self {
            medium: Arc::clone(&self.medium),
            prefix: self.prefix.clone(),
        }
    }
}
