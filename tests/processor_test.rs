//! Integration tests for the observable processing state.

mod common;

use common::memory_service;
use docsense::adapters::completion::{MockCompletionClient, MockReply};
use docsense::adapters::storage::InMemoryMedium;
use docsense::domain::models::{CompletionRequest, ContentPart};
use docsense::{DocumentProcessor, DomainError, ImageInput};
use std::sync::Arc;
use std::time::Duration;

const PNG_BYTES: [u8; 9] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0];
const JPEG_BYTES: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

fn is_png_request(request: &CompletionRequest) -> bool {
    request.messages.iter().flat_map(|m| &m.parts).any(|part| {
        matches!(part, ContentPart::ImageUrl { url } if url.starts_with("data:image/png"))
    })
}

/// PNG documents extract slowly, JPEG documents immediately.
fn slow_png_client() -> MockCompletionClient {
    MockCompletionClient::with_responder(|request| {
        let reply = if request.has_image() {
            if is_png_request(request) {
                MockReply::text("first document").after(Duration::from_millis(100))
            } else {
                MockReply::text("second document")
            }
        } else if request.messages[1].text().contains("first document") {
            MockReply::text("first summary")
        } else {
            MockReply::text("second summary")
        };
        Some(reply)
    })
}

fn processor(client: MockCompletionClient) -> Arc<DocumentProcessor<InMemoryMedium>> {
    Arc::new(DocumentProcessor::new(Arc::new(memory_service(Arc::new(
        client,
    )))))
}

#[tokio::test]
async fn test_stale_result_does_not_overwrite_newer_one() {
    common::setup_test_logging();
    let processor = processor(slow_png_client());

    let slow = {
        let processor = Arc::clone(&processor);
        tokio::spawn(async move {
            processor
                .process_image(ImageInput::from_bytes(PNG_BYTES.to_vec()))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(processor.loading().await);

    let second = ImageInput::from_bytes(JPEG_BYTES.to_vec());
    let second_ref = second.reference.clone();
    let fast = processor.process_image(second).await.unwrap();
    assert_eq!(fast.summary, "second summary");

    // The slow call still completes for its caller...
    let stale = slow.await.unwrap().unwrap();
    assert_eq!(stale.summary, "first summary");

    // ...but the state keeps the newer result
    let state = processor.snapshot().await;
    assert_eq!(processor.summary().await, "second summary");
    assert_eq!(processor.text().await, "second document");
    assert_eq!(state.image, Some(second_ref));
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_reset_discards_in_flight_result() {
    let processor = processor(slow_png_client());

    let slow = {
        let processor = Arc::clone(&processor);
        tokio::spawn(async move {
            processor
                .process_image(ImageInput::from_bytes(PNG_BYTES.to_vec()))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    processor.reset().await;

    slow.await.unwrap().unwrap();

    let state = processor.snapshot().await;
    assert_eq!(state.result, None);
    assert_eq!(state.image, None);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_failure_message_is_shown_verbatim() {
    let processor = processor(MockCompletionClient::scripted([MockReply::failure(
        "You exceeded your current quota, please check your plan and billing details.",
    )]));

    let err = processor
        .process_image(ImageInput::from_bytes(JPEG_BYTES.to_vec()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ExternalService(_)));

    let state = processor.snapshot().await;
    assert_eq!(
        state.error.as_deref(),
        Some("You exceeded your current quota, please check your plan and billing details.")
    );
    assert_eq!(state.result, None);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_empty_extraction_error_message() {
    let processor = processor(MockCompletionClient::scripted([MockReply::text("   ")]));

    processor
        .process_image(ImageInput::from_bytes(JPEG_BYTES.to_vec()))
        .await
        .unwrap_err();

    assert_eq!(
        processor.error().await.as_deref(),
        Some("No text could be extracted from the image.")
    );
}

#[tokio::test]
async fn test_new_submission_clears_previous_error() {
    let processor = processor(MockCompletionClient::scripted([
        MockReply::failure("temporary outage"),
        MockReply::text("Recovered text"),
        MockReply::text("Recovered summary"),
    ]));

    let image = ImageInput::from_bytes(JPEG_BYTES.to_vec());
    processor.process_image(image.clone()).await.unwrap_err();
    assert!(processor.error().await.is_some());

    // Manual retry
    processor.process_image(image).await.unwrap();
    assert_eq!(processor.error().await, None);
    assert_eq!(processor.summary().await, "Recovered summary");
}

#[tokio::test]
async fn test_failure_after_success_clears_displayed_result() {
    let processor = processor(MockCompletionClient::scripted([
        MockReply::text("Receipt text"),
        MockReply::text("Receipt summary"),
        MockReply::failure("temporary outage"),
    ]));
    let image = ImageInput::from_bytes(JPEG_BYTES.to_vec());

    processor.process_image(image.clone()).await.unwrap();
    assert_eq!(processor.summary().await, "Receipt summary");

    processor.process_image(image).await.unwrap_err();
    assert_eq!(processor.result().await, None);
    assert_eq!(processor.summary().await, "");
    assert_eq!(processor.error().await.as_deref(), Some("temporary outage"));
}
