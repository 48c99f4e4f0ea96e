//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - KeyValueMedium: raw persistent key-value storage
//! - CompletionClient: the external extraction/summarization/answering capability

pub mod completion_client;
pub mod key_value_medium;

pub use completion_client::CompletionClient;
pub use key_value_medium::KeyValueMedium;
