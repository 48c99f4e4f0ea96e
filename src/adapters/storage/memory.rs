//! In-memory key-value medium.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::KeyValueMedium;

/// Process-local medium backed by a shared map.
///
/// Clones share the same map, so several stores with different prefixes can
/// sit on one medium. An optional byte quota (keys plus values) makes writes
/// fail the way a browser store does when it runs out of space.
#[derive(Clone, Default)]
pub struct InMemoryMedium {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl InMemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Medium that rejects writes once `quota_bytes` would be exceeded.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of entries across all namespaces.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn used_bytes(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

#[async_trait]
impl KeyValueMedium for InMemoryMedium {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let mut entries = self.entries.write().await;

        if let Some(quota) = self.quota_bytes {
            let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
            let used = Self::used_bytes(&entries) - replaced + key.len() + value.len();
            if used > quota {
                return Err(DomainError::Storage(format!(
                    "Quota exceeded: writing {key} needs {used} bytes, limit is {quota}"
                )));
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> DomainResult<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}
