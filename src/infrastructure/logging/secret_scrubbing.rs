use regex::{Captures, Regex};
use std::fmt;

// OpenAI keys: sk-..., sk-proj-...
const API_KEY_PATTERN: &str = r"sk-[a-zA-Z0-9_-]{16,}";
const BEARER_PATTERN: &str = r"Bearer\s+[a-zA-Z0-9_.\-\[\]]+";
const TOKEN_PATTERN: &str =
    r#"["']?(?:api_key|apikey|token|secret)["']?\s*[:=]\s*["']?([a-zA-Z0-9_.\-]{20,})["']?"#;
const PASSWORD_PATTERN: &str = r#"["']?password["']?\s*[:=]\s*["']?([^"'\s,}]+)["']?"#;

/// Scrubs credentials from text before it reaches logs or callers
#[derive(Clone)]
pub struct SecretScrubber {
    api_key_pattern: Option<Regex>,
    bearer_pattern: Option<Regex>,
    token_pattern: Option<Regex>,
    password_pattern: Option<Regex>,
}

impl SecretScrubber {
    pub fn new() -> Self {
        Self {
            api_key_pattern: Regex::new(API_KEY_PATTERN).ok(),
            bearer_pattern: Regex::new(BEARER_PATTERN).ok(),
            token_pattern: Regex::new(TOKEN_PATTERN).ok(),
            password_pattern: Regex::new(PASSWORD_PATTERN).ok(),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub(&self, message: &str) -> String {
        let mut scrubbed = message.to_string();

        if let Some(pattern) = &self.api_key_pattern {
            scrubbed = pattern
                .replace_all(&scrubbed, "[API_KEY_REDACTED]")
                .into_owned();
        }
        if let Some(pattern) = &self.bearer_pattern {
            scrubbed = pattern
                .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]")
                .into_owned();
        }
        if let Some(pattern) = &self.token_pattern {
            scrubbed = pattern
                .replace_all(&scrubbed, |caps: &Captures| {
                    let full_match = &caps[0];
                    full_match.find([':', '=']).map_or_else(
                        || "[REDACTED]".to_string(),
                        |pos| format!("{}[REDACTED]", &full_match[..=pos]),
                    )
                })
                .into_owned();
        }
        if let Some(pattern) = &self.password_pattern {
            scrubbed = pattern
                .replace_all(&scrubbed, "password=[REDACTED]")
                .into_owned();
        }

        scrubbed
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
