//! Mock completion client for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::CompletionRequest;
use crate::domain::ports::CompletionClient;

/// Mock reply configuration.
#[derive(Debug, Clone, Default)]
pub struct MockReply {
    /// Completion content; `None` simulates a response without content
    pub content: Option<String>,
    /// Error message if failing
    pub error_message: Option<String>,
    /// Simulated latency before replying
    pub delay: Option<Duration>,
}

impl MockReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Reply whose response carries no content.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error_message: Some(error.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Responder = dyn Fn(&CompletionRequest) -> Option<MockReply> + Send + Sync;

/// Mock completion client.
///
/// Replies are chosen in order: the responder closure (if it returns a
/// reply), then the scripted queue, then the default reply. Every request is
/// recorded for later inspection.
pub struct MockCompletionClient {
    script: Arc<RwLock<VecDeque<MockReply>>>,
    default_reply: MockReply,
    responder: Option<Box<Responder>>,
    calls: Arc<RwLock<Vec<CompletionRequest>>>,
    configured: bool,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            script: Arc::default(),
            default_reply: MockReply::text("Mock completion."),
            responder: None,
            calls: Arc::default(),
            configured: true,
        }
    }

    /// Client that replies with `replies` in order, then the default reply.
    pub fn scripted(replies: impl IntoIterator<Item = MockReply>) -> Self {
        let client = Self::new();
        Self {
            script: Arc::new(RwLock::new(replies.into_iter().collect())),
            ..client
        }
    }

    /// Client choosing replies by inspecting each request.
    pub fn with_responder(
        responder: impl Fn(&CompletionRequest) -> Option<MockReply> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Some(Box::new(responder)),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_default_reply(mut self, reply: MockReply) -> Self {
        self.default_reply = reply;
        self
    }

    /// Simulate a missing credential.
    #[must_use]
    pub const fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Queue another reply.
    pub async fn push_reply(&self, reply: MockReply) {
        self.script.write().await.push_back(reply);
    }

    /// All requests received so far.
    pub async fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    async fn next_reply(&self, request: &CompletionRequest) -> MockReply {
        if let Some(reply) = self.responder.as_ref().and_then(|r| r(request)) {
            return reply;
        }
        self.script
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, request: CompletionRequest) -> DomainResult<Option<String>> {
        if !self.configured {
            return Err(DomainError::Configuration(
                "Mock completion client has no credential".to_string(),
            ));
        }

        let reply = self.next_reply(&request).await;
        self.calls.write().await.push(request);

        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }

        match reply.error_message {
            Some(message) => Err(DomainError::external(message)),
            None => Ok(reply.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ChatMessage;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new("mock-model", vec![ChatMessage::user(text)], 10)
    }

    #[tokio::test]
    async fn test_scripted_replies_then_default() {
        let client = MockCompletionClient::scripted([MockReply::text("one"), MockReply::empty()]);

        assert_eq!(client.complete(request("a")).await.unwrap().as_deref(), Some("one"));
        assert_eq!(client.complete(request("b")).await.unwrap(), None);
        assert_eq!(
            client.complete(request("c")).await.unwrap().as_deref(),
            Some("Mock completion.")
        );
        assert_eq!(client.call_count().await, 3);
    }

    #[tokio::test]
    async fn test_responder_takes_precedence() {
        let client = MockCompletionClient::with_responder(|req| {
            req.messages[0]
                .text()
                .contains("special")
                .then(|| MockReply::text("matched"))
        });

        assert_eq!(
            client.complete(request("special case")).await.unwrap().as_deref(),
            Some("matched")
        );
        assert_eq!(
            client.complete(request("other")).await.unwrap().as_deref(),
            Some("Mock completion.")
        );
    }

    #[tokio::test]
    async fn test_failure_and_unconfigured() {
        let client = MockCompletionClient::scripted([MockReply::failure("upstream down")]);
        let err = client.complete(request("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "upstream down");

        let client = MockCompletionClient::new().unconfigured();
        assert!(!client.is_configured());
        let err = client.complete(request("x")).await.unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
        assert_eq!(client.call_count().await, 0);
    }
}
