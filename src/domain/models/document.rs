//! Document image input and processing results.

use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// Image submitted for processing.
///
/// `reference` is a local, ephemeral handle to the source image: a `file://`
/// URL when read from disk, otherwise a `memory://` URL unique to this input.
/// It is not guaranteed to resolve after the process restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// Raw image bytes, or an already-encoded data URI
    pub bytes: Vec<u8>,
    /// Declared MIME type, if known
    pub mime_type: Option<String>,
    /// Local reference to the source image
    pub reference: String,
}

impl ImageInput {
    /// Wrap in-memory image bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: None,
            reference: format!("memory://{}", Uuid::new_v4()),
        }
    }

    /// Read an image from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            DomainError::InvalidInput(format!("Failed to read image {}: {e}", path.display()))
        })?;
        let absolute = tokio::fs::canonicalize(path)
            .await
            .unwrap_or_else(|_| path.to_path_buf());

        Ok(Self {
            bytes,
            mime_type: mime_from_extension(path).map(str::to_string),
            reference: format!("file://{}", absolute.display()),
        })
    }

    /// Override the declared MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Override the local reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Whether no image data was supplied.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Extracted text and its summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Text extracted from the image
    pub text: String,
    /// Concise summary of the extracted text
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_bytes_uses_unique_memory_reference() {
        let a = ImageInput::from_bytes(vec![1, 2, 3]);
        let b = ImageInput::from_bytes(vec![1, 2, 3]);
        assert!(a.reference.starts_with("memory://"));
        assert_ne!(a.reference, b.reference);
        assert!(a.mime_type.is_none());
    }

    #[tokio::test]
    async fn test_from_path_reads_bytes_and_guesses_mime() {
        let mut file = tempfile::Builder::new().suffix(".PNG").tempfile().unwrap();
        file.write_all(b"\x89PNG\r\n\x1a\nrest").unwrap();

        let input = ImageInput::from_path(file.path()).await.unwrap();
        assert_eq!(input.mime_type.as_deref(), Some("image/png"));
        assert!(input.reference.starts_with("file://"));
        assert_eq!(input.bytes.len(), 12);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = ImageInput::from_path("/definitely/not/here.jpg").await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }
}
