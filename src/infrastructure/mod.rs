//! Infrastructure layer module
//!
//! Cross-cutting concerns shared by the adapters and services:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)

pub mod config;
pub mod logging;
