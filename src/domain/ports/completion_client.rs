//! Completion client port - interface for the external multimodal capability.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::CompletionRequest;

/// Port trait for the third-party text/image completion service.
///
/// Two call shapes are used by the document service: a vision call with an
/// image part (extraction) and text-only calls (summarization, question
/// answering). Each call is a single attempt; adapters must not retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Client type name.
    fn name(&self) -> &'static str;

    /// Whether an access credential is present.
    ///
    /// A missing credential must not prevent construction; it surfaces as a
    /// `DomainError::Configuration` once a call is attempted.
    fn is_configured(&self) -> bool;

    /// Send one request and return the completion text.
    ///
    /// # Returns
    /// - `Some(text)` when the upstream response carries content
    /// - `None` when the response omits content
    ///
    /// # Errors
    /// - `DomainError::Configuration` if no credential is configured
    /// - `DomainError::ExternalService` for network, rate-limit or
    ///   malformed-response failures, carrying the upstream message when available
    async fn complete(&self, request: CompletionRequest) -> DomainResult<Option<String>>;
}
