pub mod completion;
pub mod config;
pub mod document;
pub mod session;

pub use completion::{ChatMessage, CompletionRequest, ContentPart, Role};
pub use config::{
    AnswerPolicyConfig, CallConfig, Config, DatabaseConfig, LoggingConfig, ModelsConfig,
    OpenAiConfig, StorageBackend, StorageConfig,
};
pub use document::{ImageInput, ProcessedDocument};
pub use session::{SessionRecord, StoredValue};
