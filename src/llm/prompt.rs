// src/llm/prompt.rs

/// Instruction sent to the model. The comment is embedded as submitted, untrimmed.
pub fn build_sentiment_prompt(comment: &str) -> String {
    format!("Analyze sentiment of this comment: {}", comment)
}
