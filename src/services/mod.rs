//! Service layer: the session store and document orchestration.

pub mod answer_policy;
pub mod document_service;
pub mod image_encoding;
pub mod kv_store;
pub mod prompts;

pub use answer_policy::{AnswerPolicy, HeuristicAnswerPolicy, PassthroughAnswerPolicy};
pub use document_service::DocumentService;
pub use kv_store::KeyValueStore;
