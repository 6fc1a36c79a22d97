// src/services/sentiment.rs
// Comment validation, provider call and strict decoding of the result

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::api::types::SentimentResponse;
use crate::error::{Result, SentimentError};
use crate::llm::prompt::build_sentiment_prompt;
use crate::llm::{StructuredProvider, StructuredRequest, sentiment_schema};

/// Rates comments through a structured-output provider.
///
/// Holds no per-request state; one instance serves every request.
pub struct SentimentAnalyzer {
    provider: Arc<dyn StructuredProvider>,
}

impl SentimentAnalyzer {
    pub fn new(provider: Arc<dyn StructuredProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn StructuredProvider {
        self.provider.as_ref()
    }

    /// Validate, prompt, call the provider once, decode.
    ///
    /// Blank comments fail before any provider call. Every other failure is an
    /// `ExternalService` error.
    pub async fn analyze(&self, comment: &str) -> Result<SentimentResponse> {
        validate_comment(comment)?;

        let request = StructuredRequest::new(build_sentiment_prompt(comment), sentiment_schema());
        let start = Instant::now();

        let outcome = self
            .provider
            .generate_structured(&request)
            .await
            .and_then(SentimentResponse::from_provider_value);
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(response) => {
                info!(
                    request_id = %request.request_id,
                    provider = self.provider.provider_name(),
                    sentiment = %response.sentiment,
                    rating = response.rating.value(),
                    duration_ms = duration_ms,
                    "Comment analyzed"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(
                    request_id = %request.request_id,
                    provider = self.provider.provider_name(),
                    kind = e.kind(),
                    duration_ms = duration_ms,
                    "Comment analysis failed: {}", e
                );
                Err(SentimentError::ExternalService(e))
            }
        }
    }
}

/// Reject comments that are empty after trimming
pub fn validate_comment(comment: &str) -> Result<()> {
    if comment.trim().is_empty() {
        return Err(SentimentError::empty_comment());
    }
    Ok(())
}
