use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::{CallConfig, Config};

/// Environment variable holding the completion credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Storage namespace cannot be empty")]
    EmptyNamespace,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("OpenAI base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Model for {0} call cannot be empty")]
    EmptyModel(&'static str),

    #[error("Invalid max_tokens for {0} call. Must be at least 1")]
    InvalidMaxTokens(&'static str),

    #[error("Invalid temperature for {0} call: {1}. Must be between 0 and 2")]
    InvalidTemperature(&'static str, f32),

    #[error("Invalid top_p for {0} call: {1}. Must be between 0 and 1")]
    InvalidTopP(&'static str, f32),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .docsense/config.yaml (project config)
    /// 3. .docsense/local.yaml (project local overrides, optional)
    /// 4. Environment variables (DOCSENSE_* prefix, highest priority)
    ///
    /// The completion credential falls back to `OPENAI_API_KEY` when no
    /// layer sets `openai.api_key`.
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Load configuration rooted at `root` instead of the working directory
    pub fn load_from_dir(root: impl AsRef<Path>) -> Result<Config> {
        let project_dir = root.as_ref().join(".docsense");

        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(project_dir.join("config.yaml")))
            .merge(Yaml::file(project_dir.join("local.yaml")))
            .merge(Env::prefixed("DOCSENSE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::resolve_api_key(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::resolve_api_key(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Blank keys count as absent; absence is reported by `is_configured`,
    /// never here.
    fn resolve_api_key(config: &mut Config) {
        let configured = config
            .openai
            .api_key
            .take()
            .filter(|key| !key.trim().is_empty());

        config.openai.api_key = configured.or_else(|| {
            std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty())
        });

        if config.openai.api_key.is_none() {
            tracing::warn!("no completion credential configured; set {API_KEY_ENV}");
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.storage.namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }

        // Validate database config
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        if config.openai.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        Self::validate_call("extraction", &config.models.extraction)?;
        Self::validate_call("summary", &config.models.summary)?;
        Self::validate_call("answer", &config.models.answer)?;

        Ok(())
    }

    fn validate_call(name: &'static str, call: &CallConfig) -> Result<(), ConfigError> {
        if call.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel(name));
        }
        if call.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(name));
        }
        if let Some(temperature) = call.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::InvalidTemperature(name, temperature));
            }
        }
        if let Some(top_p) = call.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err(ConfigError::InvalidTopP(name, top_p));
            }
        }
        Ok(())
    }
}
