// src/llm/logging.rs
// Shared logging helpers for provider clients

use super::provider::NormalizedUsage;
use tracing::info;

/// Log usage statistics for a provider call.
pub fn log_usage(request_id: &str, provider: &str, usage: &NormalizedUsage) {
    info!(
        request_id = %request_id,
        prompt_tokens = usage.prompt_tokens,
        completion_tokens = usage.completion_tokens,
        total_tokens = usage.total_tokens,
        "{} usage stats", provider
    );
}

/// Log completion summary for a provider call.
pub fn log_completion(request_id: &str, provider: &str, duration_ms: u64, content_len: usize) {
    info!(
        request_id = %request_id,
        duration_ms = duration_ms,
        content_len = content_len,
        "{} structured output complete", provider
    );
}
