use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for docsense
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Session store configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Database configuration (sqlite backend)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// External completion capability configuration
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Per-call model settings
    #[serde(default)]
    pub models: ModelsConfig,

    /// Answer post-processing settings
    #[serde(default)]
    pub answers: AnswerPolicyConfig,
}

/// Backing medium for the session store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Medium the store writes to
    #[serde(default = "default_storage_backend")]
    pub backend: StorageBackend,

    /// Key prefix partitioning this store from others on the same medium
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

const fn default_storage_backend() -> StorageBackend {
    StorageBackend::Sqlite
}

fn default_namespace() -> String {
    "ocr-sessions".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            namespace: default_namespace(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".docsense/docsense.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for file output: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// External completion capability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OpenAiConfig {
    /// Access credential. Read from `OPENAI_API_KEY` at load time when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Model and sampling settings for one call shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CallConfig {
    pub model: String,
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
}

impl CallConfig {
    fn plain(model: &str, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            max_tokens,
            temperature: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
        }
    }
}

/// Per-call model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModelsConfig {
    /// Vision call extracting text from the image
    #[serde(default = "default_extraction_call")]
    pub extraction: CallConfig,

    /// Text call summarizing the extracted text
    #[serde(default = "default_summary_call")]
    pub summary: CallConfig,

    /// Text call answering questions against a context
    #[serde(default = "default_answer_call")]
    pub answer: CallConfig,
}

fn default_extraction_call() -> CallConfig {
    CallConfig::plain("gpt-4o", 2000)
}

fn default_summary_call() -> CallConfig {
    CallConfig {
        temperature: Some(0.5),
        ..CallConfig::plain("gpt-4", 1000)
    }
}

fn default_answer_call() -> CallConfig {
    CallConfig {
        temperature: Some(0.3),
        top_p: Some(0.9),
        frequency_penalty: Some(0.5),
        presence_penalty: Some(0.5),
        ..CallConfig::plain("gpt-3.5-turbo", 500)
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            extraction: default_extraction_call(),
            summary: default_summary_call(),
            answer: default_answer_call(),
        }
    }
}

/// Answer post-processing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnswerPolicyConfig {
    /// Answers shorter than this many characters are replaced
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Case-insensitive phrases marking an answer as "nothing found"
    #[serde(default = "default_unhelpful_phrases")]
    pub unhelpful_phrases: Vec<String>,
}

const fn default_min_length() -> usize {
    20
}

fn default_unhelpful_phrases() -> Vec<String> {
    vec!["i cannot find".to_string(), "no answer".to_string()]
}

impl Default for AnswerPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            unhelpful_phrases: default_unhelpful_phrases(),
        }
    }
}
