//! OpenAI chat-completions adapter.
//!
//! Calls the `/chat/completions` endpoint of OpenAI or any compatible API.
//! One attempt per call: transient failures surface to the caller, who
//! decides whether to retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::errors::{DomainError, DomainResult, GENERIC_EXTERNAL_FAILURE};
use crate::domain::models::{ChatMessage, CompletionRequest, ContentPart, OpenAiConfig, Role};
use crate::domain::ports::CompletionClient;
use crate::infrastructure::logging::SecretScrubber;

/// Configuration for the OpenAI completion client.
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API key. Absent keys are reported when a call is attempted.
    pub api_key: Option<String>,
    /// Base URL for the API. Default: `https://api.openai.com/v1`.
    pub base_url: String,
    /// Request timeout in seconds. Default: 120.
    pub timeout_secs: u64,
}

impl Default for OpenAiClientConfig {
    fn default() -> Self {
        Self::from(&OpenAiConfig::default())
    }
}

impl From<&OpenAiConfig> for OpenAiClientConfig {
    fn from(config: &OpenAiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

impl OpenAiClientConfig {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/// OpenAI completion client.
pub struct OpenAiCompletionClient {
    config: OpenAiClientConfig,
    http_client: reqwest::Client,
    scrubber: SecretScrubber,
}

impl OpenAiCompletionClient {
    pub fn new(config: OpenAiClientConfig) -> DomainResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
            scrubber: SecretScrubber::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Best available message from a non-success response body.
    fn upstream_message(&self, body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .filter(|message| !message.trim().is_empty())
            .map_or_else(
                || GENERIC_EXTERNAL_FAILURE.to_string(),
                |message| self.scrubber.scrub(&message),
            )
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        self.config.api_key().is_some()
    }

    async fn complete(&self, request: CompletionRequest) -> DomainResult<Option<String>> {
        let api_key = self.config.api_key().ok_or_else(|| {
            DomainError::Configuration(
                "OpenAI API key not set. Set OPENAI_API_KEY or configure openai.api_key."
                    .to_string(),
            )
        })?;

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            vision = request.has_image(),
            "sending completion request"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&ChatCompletionsRequest::from(&request))
            .send()
            .await
            .map_err(|e| DomainError::external(self.scrubber.scrub(&e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = self.upstream_message(&body);
            warn!(status = status.as_u16(), error = %message, "completion request failed");
            return Err(DomainError::external(message));
        }

        let completion: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|e| DomainError::external(format!("Malformed completion response: {e}")))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty()))
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
}

impl<'a> From<&'a CompletionRequest> for ChatCompletionsRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: WireContent<'a>,
}

impl<'a> From<&'a ChatMessage> for WireMessage<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        // Text-only messages use the plain string form.
        let content = if message.has_image() {
            WireContent::Parts(message.parts.iter().map(WirePart::from).collect())
        } else {
            WireContent::Text(message.text())
        };
        Self {
            role: message.role,
            content,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireContent<'a> {
    Text(String),
    Parts(Vec<WirePart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: WireImageUrl<'a> },
}

impl<'a> From<&'a ContentPart> for WirePart<'a> {
    fn from(part: &'a ContentPart) -> Self {
        match part {
            ContentPart::Text { text } => Self::Text { text },
            ContentPart::ImageUrl { url } => Self::ImageUrl {
                image_url: WireImageUrl { url },
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct WireImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}
