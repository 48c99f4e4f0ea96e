//! Layered configuration: defaults, project YAML, local YAML, then
//! `DOCSENSE_` environment variables.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, API_KEY_ENV};
