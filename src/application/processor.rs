//! Observable processing state for a presentation layer.
//!
//! `DocumentProcessor` holds the latest extract-and-summarize result together
//! with loading and error flags. Every submission and every reset takes a new
//! generation number; a response is applied only if its generation is still
//! the latest, so a slow earlier request can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ImageInput, ProcessedDocument};
use crate::domain::ports::KeyValueMedium;
use crate::services::document_service::{DocumentService, NO_IMAGE_PROVIDED};

/// Snapshot of the processor state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessorState {
    /// Reference of the most recently submitted image
    pub image: Option<String>,
    pub loading: bool,
    /// Message of the last failure, shown verbatim
    pub error: Option<String>,
    pub result: Option<ProcessedDocument>,
}

pub struct DocumentProcessor<M: KeyValueMedium> {
    service: Arc<DocumentService<M>>,
    state: RwLock<ProcessorState>,
    generation: AtomicU64,
}

impl<M: KeyValueMedium> DocumentProcessor<M> {
    pub fn new(service: Arc<DocumentService<M>>) -> Self {
        Self {
            service,
            state: RwLock::new(ProcessorState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// The service used for processing and question answering.
    pub fn service(&self) -> &Arc<DocumentService<M>> {
        &self.service
    }

    /// Extract and summarize `image` through the stateless service path.
    ///
    /// The outcome is returned to the caller either way; it is recorded in
    /// the state only if no newer submission or reset happened meanwhile.
    /// A recorded failure clears any previously displayed result.
    #[instrument(skip(self, image), fields(image = %image.reference))]
    pub async fn process_image(&self, image: ImageInput) -> DomainResult<ProcessedDocument> {
        if image.is_empty() {
            let mut state = self.state.write().await;
            self.generation.fetch_add(1, Ordering::SeqCst);
            state.error = Some(NO_IMAGE_PROVIDED.to_string());
            state.loading = false;
            error!("{NO_IMAGE_PROVIDED}");
            return Err(DomainError::InvalidInput(NO_IMAGE_PROVIDED.to_string()));
        }

        let generation = {
            let mut state = self.state.write().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.error = None;
            state.image = Some(image.reference.clone());
            generation
        };
        debug!(generation, "processing started");

        let outcome = self.service.summarize(&image).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding superseded result");
            return outcome;
        }

        state.loading = false;
        match &outcome {
            Ok(document) => {
                state.result = Some(document.clone());
                info!(generation, "processing completed");
            }
            Err(e) => {
                state.result = None;
                state.error = Some(e.to_string());
                error!(generation, error = %e, "processing failed");
            }
        }

        outcome
    }

    /// Clear image, result and error. Any in-flight result is discarded.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = ProcessorState::default();
    }

    pub async fn snapshot(&self) -> ProcessorState {
        self.state.read().await.clone()
    }

    /// Extracted text of the current result, or empty.
    pub async fn text(&self) -> String {
        self.state
            .read()
            .await
            .result
            .as_ref()
            .map(|r| r.text.clone())
            .unwrap_or_default()
    }

    /// Summary of the current result, or empty.
    pub async fn summary(&self) -> String {
        self.state
            .read()
            .await
            .result
            .as_ref()
            .map(|r| r.summary.clone())
            .unwrap_or_default()
    }

    pub async fn image(&self) -> Option<String> {
        self.state.read().await.image.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn result(&self) -> Option<ProcessedDocument> {
        self.state.read().await.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::completion::{MockCompletionClient, MockReply};
    use crate::adapters::storage::InMemoryMedium;
    use crate::services::kv_store::KeyValueStore;

    fn processor(client: MockCompletionClient) -> DocumentProcessor<InMemoryMedium> {
        let store = KeyValueStore::new(Arc::new(InMemoryMedium::new()), "ocr-sessions");
        DocumentProcessor::new(Arc::new(DocumentService::new(Arc::new(client), store)))
    }

    #[tokio::test]
    async fn test_successful_processing_updates_state() {
        let processor = processor(MockCompletionClient::scripted([
            MockReply::text("Hello World"),
            MockReply::text("Greeting."),
        ]));
        let image = ImageInput::from_bytes(vec![1, 2, 3]);
        let reference = image.reference.clone();

        let document = processor.process_image(image).await.unwrap();
        assert_eq!(document.summary, "Greeting.");

        let state = processor.snapshot().await;
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.image, Some(reference));
        assert_eq!(processor.text().await, "Hello World");
        assert_eq!(processor.summary().await, "Greeting.");
    }

    #[tokio::test]
    async fn test_empty_image_sets_error() {
        let processor = processor(MockCompletionClient::new());

        let err = processor
            .process_image(ImageInput::from_bytes(Vec::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(processor.error().await.as_deref(), Some(NO_IMAGE_PROVIDED));
        assert!(!processor.loading().await);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let processor = processor(MockCompletionClient::scripted([
            MockReply::text("Text"),
            MockReply::text("Summary"),
        ]));
        processor
            .process_image(ImageInput::from_bytes(vec![1]))
            .await
            .unwrap();

        processor.reset().await;

        assert_eq!(processor.snapshot().await, ProcessorState::default());
        assert_eq!(processor.text().await, "");
        assert_eq!(processor.summary().await, "");
    }
}
