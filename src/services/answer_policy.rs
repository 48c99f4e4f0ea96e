//! Post-processing of question answers.
//!
//! The default heuristic is a usability aid, not a correctness guarantee: it
//! swaps very short or "nothing found" answers for a request to rephrase.

use crate::domain::models::AnswerPolicyConfig;
use crate::services::prompts::CLARIFICATION_MESSAGE;

/// Decides whether an answer is shown as-is or replaced.
pub trait AnswerPolicy: Send + Sync {
    /// Whether `answer` should reach the user unchanged.
    fn accepts(&self, answer: &str) -> bool;

    /// Replacement for rejected answers.
    fn clarification(&self) -> &str {
        CLARIFICATION_MESSAGE
    }

    /// Apply the policy to a raw answer.
    fn apply(&self, answer: String) -> String {
        if self.accepts(&answer) {
            answer
        } else {
            self.clarification().to_string()
        }
    }
}

/// Rejects answers below a minimum length or containing a known phrase.
#[derive(Debug, Clone)]
pub struct HeuristicAnswerPolicy {
    min_length: usize,
    /// Stored lowercased
    phrases: Vec<String>,
}

impl HeuristicAnswerPolicy {
    pub fn new(min_length: usize, phrases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            min_length,
            phrases: phrases
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

impl From<&AnswerPolicyConfig> for HeuristicAnswerPolicy {
    fn from(config: &AnswerPolicyConfig) -> Self {
        Self::new(config.min_length, config.unhelpful_phrases.iter().cloned())
    }
}

impl Default for HeuristicAnswerPolicy {
    fn default() -> Self {
        Self::from(&AnswerPolicyConfig::default())
    }
}

impl AnswerPolicy for HeuristicAnswerPolicy {
    fn accepts(&self, answer: &str) -> bool {
        if answer.chars().count() < self.min_length {
            return false;
        }
        let lowered = answer.to_lowercase();
        !self.phrases.iter().any(|phrase| lowered.contains(phrase))
    }
}

/// Accepts every answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughAnswerPolicy;

impl AnswerPolicy for PassthroughAnswerPolicy {
    fn accepts(&self, _answer: &str) -> bool {
        true
    }
}
