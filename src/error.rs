// src/error.rs
// Error types for sentiment analysis and the model provider boundary

use std::time::Duration;
use thiserror::Error;

/// Message returned when the submitted comment is blank
pub const EMPTY_COMMENT_MESSAGE: &str = "Comment cannot be empty";

/// Failures while obtaining or decoding a structured result from the model provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("authentication with model provider failed: {0}")]
    Authentication(String),

    #[error("model provider request timed out after {0:?}")]
    Timeout(Duration),

    #[error("model provider unreachable: {0}")]
    Transport(String),

    #[error("model provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("model refused to answer: {0}")]
    Refusal(String),

    #[error("model response incomplete: {0}")]
    Incomplete(String),

    #[error("malformed model provider response: {0}")]
    MalformedResponse(String),

    #[error("model output does not match the sentiment schema: {0}")]
    SchemaViolation(String),
}

impl ProviderError {
    /// Stable label used in logs and error envelopes
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "authentication",
            Self::Timeout(_) => "timeout",
            Self::Transport(_) => "transport",
            Self::Api { .. } => "api",
            Self::Refusal(_) => "refusal",
            Self::Incomplete(_) => "incomplete",
            Self::MalformedResponse(_) => "malformed_response",
            Self::SchemaViolation(_) => "schema_violation",
        }
    }

    /// Whether a caller could reasonably try the same request again.
    /// Reported only; nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Transport(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Main error type for comment analysis
#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    ExternalService(#[from] ProviderError),
}

/// Convenience type alias for Result using SentimentError
pub type Result<T> = std::result::Result<T, SentimentError>;

impl SentimentError {
    pub fn empty_comment() -> Self {
        SentimentError::Validation(EMPTY_COMMENT_MESSAGE.to_string())
    }
}
