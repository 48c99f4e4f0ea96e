//! Wiring a `DocumentService` from loaded configuration.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::adapters::completion::{OpenAiClientConfig, OpenAiCompletionClient};
use crate::adapters::sqlite::{initialize_from_config, SqliteMedium};
use crate::adapters::storage::{ConfiguredMedium, InMemoryMedium};
use crate::domain::models::{Config, StorageBackend};
use crate::domain::ports::{CompletionClient, KeyValueMedium};
use crate::services::answer_policy::HeuristicAnswerPolicy;
use crate::services::document_service::DocumentService;
use crate::services::kv_store::KeyValueStore;

/// Open the medium selected by `storage.backend`, migrating SQLite if needed.
pub async fn open_medium(config: &Config) -> Result<ConfiguredMedium> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(ConfiguredMedium::Memory(InMemoryMedium::new())),
        StorageBackend::Sqlite => {
            let pool = initialize_from_config(&config.database)
                .await
                .with_context(|| format!("Failed to open database at {}", config.database.path))?;
            Ok(ConfiguredMedium::Sqlite(SqliteMedium::new(pool)))
        }
    }
}

/// Assemble a service over an existing medium and client, applying the
/// namespace, model and answer settings from `config`.
pub fn assemble_service<M: KeyValueMedium>(
    config: &Config,
    medium: Arc<M>,
    client: Arc<dyn CompletionClient>,
) -> DocumentService<M> {
    let store = KeyValueStore::new(medium, config.storage.namespace.clone());

    DocumentService::new(client, store)
        .with_models(config.models.clone())
        .with_answer_policy(Arc::new(HeuristicAnswerPolicy::from(&config.answers)))
}

/// Build the production service: configured medium plus the OpenAI client.
///
/// A missing credential does not fail here; check
/// `DocumentService::is_configured` before offering processing.
pub async fn build_document_service(config: &Config) -> Result<DocumentService<ConfiguredMedium>> {
    let medium = open_medium(config).await?;
    let client = OpenAiCompletionClient::new(OpenAiClientConfig::from(&config.openai))
        .context("Failed to create completion client")?;

    info!(
        backend = medium.name(),
        namespace = %config.storage.namespace,
        configured = client.is_configured(),
        "document service ready"
    );

    Ok(assemble_service(config, Arc::new(medium), Arc::new(client)))
}
