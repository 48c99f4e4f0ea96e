//! Domain models for persisted document sessions.
//!
//! A session pairs a generated identifier with the summary of one processed
//! document image. Records are immutable once created: the store supports
//! create, read, enumerate and delete, never update.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value that can be written through a `KeyValueStore`.
///
/// Every stored value is wrapped in an envelope carrying `SCHEMA` and
/// `VERSION`; reads whose tag does not match are treated as not found.
pub trait StoredValue: Serialize + DeserializeOwned + Send + Sync {
    /// Schema tag written alongside each value
    const SCHEMA: &'static str;

    /// Schema version written alongside each value
    const VERSION: u32;
}

/// Persisted result of processing one document image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Unique session identifier, generated at creation
    pub id: String,

    /// Summary produced by the summarization step (may be empty)
    pub summary: String,

    /// Local, ephemeral reference to the source image
    pub image_url: String,

    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl SessionRecord {
    /// Creates a record with a fresh identifier and the current time
    pub fn new(summary: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            summary: summary.into(),
            image_url: image_url.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

impl StoredValue for SessionRecord {
    const SCHEMA: &'static str = "session-record";
    const VERSION: u32 = 1;
}
