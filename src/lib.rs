//! docsense - document image extraction, summarization and Q&A
//!
//! docsense sends a document image to a multimodal completion service,
//! extracts its text and a summary, persists the result as a session in a
//! prefix-namespaced key-value store, and answers free-form questions against
//! a session or an ad hoc text context.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, error taxonomy and port traits
//! - **Adapters** (`adapters`): In-memory and SQLite media, OpenAI and mock completion clients
//! - **Service Layer** (`services`): Session store, prompts, answer policy, document orchestration
//! - **Application Layer** (`application`): Wiring from config and observable processing state
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//!
//! # Example
//!
//! ```ignore
//! use docsense::{build_document_service, ConfigLoader, ImageInput};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let service = build_document_service(&config).await?;
//!
//!     let image = ImageInput::from_path("receipt.jpg").await?;
//!     let session = service.create_session(&image).await?;
//!     let answer = service
//!         .ask_question_for_session("What is the total?", &session.id)
//!         .await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::completion::{MockCompletionClient, MockReply, OpenAiCompletionClient};
pub use adapters::sqlite::SqliteMedium;
pub use adapters::storage::{ConfiguredMedium, InMemoryMedium};
pub use application::{build_document_service, DocumentProcessor, ProcessorState};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{Config, ImageInput, ProcessedDocument, SessionRecord, StoredValue};
pub use domain::ports::{CompletionClient, KeyValueMedium};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::{LogConfig, LoggerImpl};
pub use services::{
    AnswerPolicy, DocumentService, HeuristicAnswerPolicy, KeyValueStore, PassthroughAnswerPolicy,
};
