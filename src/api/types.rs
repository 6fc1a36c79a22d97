// src/api/types.rs
// Request and response bodies for the comment endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::ProviderError;

/// Body of `POST /comment`. A missing or null comment is treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

impl CommentRequest {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
        }
    }

    pub fn comment(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

/// Polarity of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intensity score, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Rating::new)
            .ok_or_else(|| {
                format!(
                    "rating must be between {} and {}, got {}",
                    Rating::MIN,
                    Rating::MAX,
                    value
                )
            })
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Structured sentiment judgment returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentimentResponse {
    pub sentiment: Sentiment,
    pub rating: Rating,
}

impl SentimentResponse {
    /// Decode the provider's structured output, rejecting anything outside the schema
    pub fn from_provider_value(value: Value) -> Result<Self, ProviderError> {
        serde_json::from_value(value).map_err(|e| ProviderError::SchemaViolation(e.to_string()))
    }
}
