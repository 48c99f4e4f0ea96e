//! Document service: extraction, summarization, sessions and question answering.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    CallConfig, ChatMessage, CompletionRequest, ImageInput, ModelsConfig, ProcessedDocument,
    SessionRecord,
};
use crate::domain::ports::{CompletionClient, KeyValueMedium};
use crate::services::answer_policy::{AnswerPolicy, HeuristicAnswerPolicy};
use crate::services::image_encoding::to_data_uri;
use crate::services::kv_store::KeyValueStore;
use crate::services::prompts;

/// Error text for processing without image data.
pub const NO_IMAGE_PROVIDED: &str = "No image file provided";

/// Orchestrates the completion capability and the session store.
///
/// Each operation makes single-attempt calls in sequence; failures surface
/// to the caller, which owns any retry.
pub struct DocumentService<M: KeyValueMedium> {
    client: Arc<dyn CompletionClient>,
    store: KeyValueStore<M>,
    models: ModelsConfig,
    answer_policy: Arc<dyn AnswerPolicy>,
}

impl<M: KeyValueMedium> DocumentService<M> {
    pub fn new(client: Arc<dyn CompletionClient>, store: KeyValueStore<M>) -> Self {
        Self {
            client,
            store,
            models: ModelsConfig::default(),
            answer_policy: Arc::new(HeuristicAnswerPolicy::default()),
        }
    }

    #[must_use]
    pub fn with_models(mut self, models: ModelsConfig) -> Self {
        self.models = models;
        self
    }

    #[must_use]
    pub fn with_answer_policy(mut self, policy: Arc<dyn AnswerPolicy>) -> Self {
        self.answer_policy = policy;
        self
    }

    pub fn store(&self) -> &KeyValueStore<M> {
        &self.store
    }

    /// Whether the completion capability has a credential.
    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Extract the text of `image` and summarize it. Nothing is persisted.
    ///
    /// # Errors
    /// - `DomainError::InvalidInput` if the image has no data
    /// - `DomainError::EmptyExtraction` if the extracted text is blank; no
    ///   summarization call is made
    /// - `DomainError::ExternalService` / `DomainError::Configuration` from
    ///   the completion capability
    #[instrument(skip(self, image), fields(image = %image.reference, bytes = image.bytes.len()))]
    pub async fn summarize(&self, image: &ImageInput) -> DomainResult<ProcessedDocument> {
        if image.is_empty() {
            return Err(DomainError::InvalidInput(NO_IMAGE_PROVIDED.to_string()));
        }

        let text = self.extract_text(image).await?;
        if text.trim().is_empty() {
            warn!("extraction returned no text");
            return Err(DomainError::EmptyExtraction);
        }
        debug!(chars = text.len(), "text extracted");

        let summary = self.generate_summary(&text).await?;
        info!(summary_chars = summary.len(), "document summarized");

        Ok(ProcessedDocument { text, summary })
    }

    /// Vision call returning the raw extracted text (empty if none).
    async fn extract_text(&self, image: &ImageInput) -> DomainResult<String> {
        let message = ChatMessage::user_with_image(prompts::EXTRACTION_INSTRUCTION, to_data_uri(image));
        let request = build_request(&self.models.extraction, vec![message]);

        Ok(self.client.complete(request).await?.unwrap_or_default())
    }

    async fn generate_summary(&self, text: &str) -> DomainResult<String> {
        let messages = vec![
            ChatMessage::system(prompts::SUMMARY_SYSTEM_PROMPT),
            ChatMessage::user(prompts::summary_prompt(text)),
        ];
        let request = build_request(&self.models.summary, messages);

        Ok(non_blank(self.client.complete(request).await?)
            .unwrap_or_else(|| prompts::NO_SUMMARY_FALLBACK.to_string()))
    }

    /// Answer `question` against `context`, then apply the answer policy.
    #[instrument(skip(self, question, context), fields(context_chars = context.len()))]
    pub async fn ask_question(&self, question: &str, context: &str) -> DomainResult<String> {
        let messages = vec![
            ChatMessage::system(prompts::answer_system_prompt(context)),
            ChatMessage::user(question),
        ];
        let request = build_request(&self.models.answer, messages);

        let answer = non_blank(self.client.complete(request).await?)
            .unwrap_or_else(|| prompts::NO_ANSWER_FALLBACK.to_string());

        Ok(self.answer_policy.apply(answer))
    }

    /// Summarize `image` and persist the result as a new session.
    #[instrument(skip(self, image), fields(image = %image.reference))]
    pub async fn create_session(&self, image: &ImageInput) -> DomainResult<SessionRecord> {
        let document = self.summarize(image).await?;
        let record = SessionRecord::new(document.summary, image.reference.clone());

        self.store.set_item(&record.id, &record).await?;
        info!(session_id = %record.id, "session created");

        Ok(record)
    }

    /// Answer `question` against a stored session's summary.
    ///
    /// # Errors
    /// `DomainError::SessionNotFound` if no readable session has this id.
    #[instrument(skip(self, question))]
    pub async fn ask_question_for_session(
        &self,
        question: &str,
        session_id: &str,
    ) -> DomainResult<String> {
        let record = self
            .get_session(session_id)
            .await?
            .ok_or_else(|| DomainError::SessionNotFound(session_id.to_string()))?;

        self.ask_question(question, &record.summary).await
    }

    /// All stored sessions, newest first.
    pub async fn list_sessions(&self) -> DomainResult<Vec<SessionRecord>> {
        let mut sessions: Vec<SessionRecord> = self.store.get_all_items().await?;
        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(sessions)
    }

    pub async fn get_session(&self, session_id: &str) -> DomainResult<Option<SessionRecord>> {
        self.store.get_item(session_id).await
    }

    /// Delete a session; unknown ids are a no-op.
    #[instrument(skip(self))]
    pub async fn delete_session(&self, session_id: &str) -> DomainResult<()> {
        self.store.remove_item(session_id).await
    }
}

/// Blank completions count as omitted content.
fn non_blank(content: Option<String>) -> Option<String> {
    content.filter(|c| !c.trim().is_empty())
}

fn build_request(call: &CallConfig, messages: Vec<ChatMessage>) -> CompletionRequest {
    CompletionRequest {
        temperature: call.temperature,
        top_p: call.top_p,
        frequency_penalty: call.frequency_penalty,
        presence_penalty: call.presence_penalty,
        ..CompletionRequest::new(call.model.clone(), messages, call.max_tokens)
    }
}
