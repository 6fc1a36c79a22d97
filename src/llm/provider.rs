// src/llm/provider.rs
// Model provider abstraction layer

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::schema::OutputSchema;
use crate::error::ProviderError;

/// One prompt plus the schema its answer must follow
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub request_id: String,
    pub prompt: String,
    pub schema: OutputSchema,
}

impl StructuredRequest {
    pub fn new(prompt: impl Into<String>, schema: OutputSchema) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            schema,
        }
    }
}

/// Normalized usage statistics reported by a provider
#[derive(Debug, Clone, Default)]
pub struct NormalizedUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl NormalizedUsage {
    pub fn new(prompt: u32, completion: u32) -> Self {
        Self {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: prompt + completion,
        }
    }
}

/// A provider that either returns JSON satisfying the request's schema or fails.
///
/// Implementations are not expected to validate the returned value against the
/// schema; callers decode it into their own typed structure.
#[async_trait]
pub trait StructuredProvider: Send + Sync {
    /// Run one schema-constrained generation
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<Value, ProviderError>;

    /// Short provider label for logs
    fn provider_name(&self) -> &'static str;

    /// Model identifier requests are sent to
    fn model(&self) -> &str;
}
