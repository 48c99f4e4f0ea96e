//! Fixed instructions sent to the completion capability and canned replies.

pub const EXTRACTION_INSTRUCTION: &str =
    "Extract all text from this image. Preserve the formatting and structure as much as possible.";

pub const SUMMARY_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes text while preserving key information.";

/// Used when the summary response carries no content.
pub const NO_SUMMARY_FALLBACK: &str = "No summary available.";

/// Used when the answer response carries no content.
pub const NO_ANSWER_FALLBACK: &str =
    "I'm not sure how to respond to that. Could you rephrase your question?";

/// Replaces answers the answer policy rejects.
pub const CLARIFICATION_MESSAGE: &str = "I couldn't find a specific answer in the document. Could you provide more details or try rephrasing your question?";

const ANSWER_GUIDELINES: &str = "\
You are a helpful AI assistant that provides clear, concise answers based on the provided context.

Follow these guidelines:
1. If the context contains the answer, provide a clear and helpful response.
2. If the context is related but doesn't directly answer the question, provide a helpful response based on the available information.
3. If the context is completely unrelated, politely explain that the document doesn't contain relevant information.
4. If the question is unclear or too broad, ask for clarification.
5. Be conversational and helpful in your responses.";

pub fn summary_prompt(text: &str) -> String {
    format!("Please summarize the following text concisely:\n\n{text}\n\nSummary:")
}

/// System instruction for question answering with the document embedded.
pub fn answer_system_prompt(context: &str) -> String {
    format!("{ANSWER_GUIDELINES}\n\nDocument Context: {context}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_prompt_embeds_context_after_guidelines() {
        let prompt = answer_system_prompt("Invoice #42, total $10");
        assert!(prompt.starts_with("You are a helpful AI assistant"));
        assert!(prompt.contains("5. Be conversational"));
        assert!(prompt.ends_with("Document Context: Invoice #42, total $10"));
    }

    #[test]
    fn test_summary_prompt_wraps_text() {
        let prompt = summary_prompt("Hello World");
        assert!(prompt.contains("\n\nHello World\n\n"));
        assert!(prompt.ends_with("Summary:"));
    }
}
