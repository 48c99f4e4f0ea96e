//! External completion capability adapters.

pub mod mock;
pub mod openai;

pub use mock::{MockCompletionClient, MockReply};
pub use openai::{OpenAiClientConfig, OpenAiCompletionClient};
