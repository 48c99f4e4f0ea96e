//! Medium chosen at runtime from `storage.backend`.

use async_trait::async_trait;

use crate::adapters::sqlite::SqliteMedium;
use crate::adapters::storage::InMemoryMedium;
use crate::domain::errors::DomainResult;
use crate::domain::ports::KeyValueMedium;

#[derive(Clone)]
pub enum ConfiguredMedium {
    Memory(InMemoryMedium),
    Sqlite(SqliteMedium),
}

impl ConfiguredMedium {
    fn inner(&self) -> &dyn KeyValueMedium {
        match self {
            Self::Memory(medium) => medium,
            Self::Sqlite(medium) => medium,
        }
    }
}

#[async_trait]
impl KeyValueMedium for ConfiguredMedium {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.inner().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.inner().set(key, value).await
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.inner().remove(key).await
    }

    async fn keys(&self) -> DomainResult<Vec<String>> {
        self.inner().keys().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    #[tokio::test]
    async fn test_delegates_to_inner_medium() {
        let memory = ConfiguredMedium::Memory(InMemoryMedium::new());
        let sqlite = ConfiguredMedium::Sqlite(SqliteMedium::new(
            create_migrated_test_pool().await.unwrap(),
        ));

        for medium in [memory, sqlite] {
            medium.set("k", "v").await.unwrap();
            assert_eq!(medium.get("k").await.unwrap().as_deref(), Some("v"));
            assert_eq!(medium.keys().await.unwrap(), vec!["k".to_string()]);
            medium.remove("k").await.unwrap();
            assert!(medium.get("k").await.unwrap().is_none());
        }
    }
}
