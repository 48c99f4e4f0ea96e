//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use docsense::adapters::completion::MockCompletionClient;
use docsense::adapters::storage::InMemoryMedium;
use docsense::{DocumentService, ImageInput, KeyValueStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Namespace used by the document service in tests
pub const NAMESPACE: &str = "ocr-sessions";

/// Smallest byte sequence recognised as a JPEG
pub const JPEG_BYTES: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

/// Create a temporary test database
///
/// Returns the path to a SQLite database file in a temporary directory.
pub fn temp_db_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    (dir, db_path)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn jpeg_image() -> ImageInput {
    ImageInput::from_bytes(JPEG_BYTES.to_vec())
}

/// Document service over a fresh in-memory medium
pub fn memory_service(client: Arc<MockCompletionClient>) -> DocumentService<InMemoryMedium> {
    memory_service_on(Arc::new(InMemoryMedium::new()), client)
}

/// Document service over a shared medium, for inspecting raw entries
pub fn memory_service_on(
    medium: Arc<InMemoryMedium>,
    client: Arc<MockCompletionClient>,
) -> DocumentService<InMemoryMedium> {
    DocumentService::new(client, KeyValueStore::new(medium, NAMESPACE))
}
