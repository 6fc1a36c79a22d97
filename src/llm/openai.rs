// src/llm/openai.rs
// OpenAI client for schema-constrained output using the Responses API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{Span, debug, instrument};

use super::http_client::LlmHttpClient;
use super::logging::{log_completion, log_usage};
use super::provider::{NormalizedUsage, StructuredProvider, StructuredRequest};
use super::schema::OutputSchema;
use crate::config::ProviderConfig;
use crate::error::ProviderError;

/// Environment variable holding the credential
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

// ============================================================================
// Responses API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    text: TextConfig<'a>,
    /// Nothing is threaded across requests
    store: bool,
}

#[derive(Debug, Serialize)]
struct TextConfig<'a> {
    format: FormatConfig<'a>,
}

#[derive(Debug, Serialize)]
struct FormatConfig<'a> {
    #[serde(rename = "type")]
    format_type: &'static str, // "json_schema"
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

impl<'a> ResponsesRequest<'a> {
    fn new(model: &'a str, prompt: &'a str, schema: &'a OutputSchema) -> Self {
        Self {
            model,
            input: prompt,
            text: TextConfig {
                format: FormatConfig {
                    format_type: "json_schema",
                    name: &schema.name,
                    strict: schema.strict,
                    schema: &schema.schema,
                },
            },
            store: false,
        }
    }
}

// ============================================================================
// Responses API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    incomplete_details: Option<IncompleteDetails>,
    #[serde(default)]
    error: Option<ResponseErrorBody>,
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    usage: Option<ResponsesUsage>,
}

#[derive(Debug, Deserialize)]
struct IncompleteDetails {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Output item; reasoning and tool items are ignored
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum OutputItem {
    #[serde(rename = "message")]
    Message(MessageOutput),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct MessageOutput {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "output_text")]
    OutputText { text: String },
    #[serde(rename = "refusal")]
    Refusal { refusal: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ResponsesUsage {
    input_tokens: u32,
    output_tokens: u32,
}

impl ResponsesResponse {
    /// Reduce the response to the JSON text the model produced
    fn into_output_text(self) -> Result<String, ProviderError> {
        match self.status.as_deref() {
            Some("incomplete") => {
                let reason = self
                    .incomplete_details
                    .and_then(|d| d.reason)
                    .unwrap_or_else(|| "unknown reason".to_string());
                return Err(ProviderError::Incomplete(reason));
            }
            Some("failed") => {
                let message = self
                    .error
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| "response failed".to_string());
                return Err(ProviderError::Incomplete(message));
            }
            _ => {}
        }

        let mut text = String::new();
        for item in self.output {
            let OutputItem::Message(message) = item else {
                continue;
            };
            for part in message.content {
                match part {
                    ContentPart::OutputText { text: chunk } => text.push_str(&chunk),
                    ContentPart::Refusal { refusal } => return Err(ProviderError::Refusal(refusal)),
                    ContentPart::Other => {}
                }
            }
        }

        if text.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(
                "response contained no output text".to_string(),
            ));
        }
        Ok(text)
    }
}

// ============================================================================
// Client Implementation
// ============================================================================

/// OpenAI client using the Responses API with strict JSON schema output
pub struct OpenAiClient {
    api_key: Option<String>,
    model: String,
    responses_url: String,
    http: LlmHttpClient,
}

impl OpenAiClient {
    /// Build the client. A missing key is not an error here; calls fail with
    /// `Authentication` instead.
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            responses_url: format!("{}/responses", config.base_url.trim_end_matches('/')),
            http: LlmHttpClient::new(config.request_timeout, config.connect_timeout),
        }
    }

    pub fn responses_url(&self) -> &str {
        &self.responses_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl StructuredProvider for OpenAiClient {
    #[instrument(skip(self, request), fields(request_id = %request.request_id, model = %self.model, schema = %request.schema.name, duration_ms))]
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<Value, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::Authentication(format!("{} is not set", OPENAI_API_KEY_ENV))
        })?;

        let body = serde_json::to_value(ResponsesRequest::new(
            &self.model,
            &request.prompt,
            &request.schema,
        ))
        .map_err(|e| ProviderError::MalformedResponse(format!("failed to encode request: {}", e)))?;

        debug!(request_id = %request.request_id, url = %self.responses_url, "Sending Responses API request");

        let start = Instant::now();
        let raw = self
            .http
            .post_json(&request.request_id, &self.responses_url, api_key, &body)
            .await?;
        let duration_ms = start.elapsed().as_millis() as u64;
        Span::current().record("duration_ms", duration_ms);

        let parsed: ResponsesResponse = serde_json::from_str(&raw).map_err(|e| {
            ProviderError::MalformedResponse(format!("failed to parse Responses API body: {}", e))
        })?;

        debug!(request_id = %request.request_id, response_id = ?parsed.id, "Responses API reply received");

        if let Some(usage) = &parsed.usage {
            log_usage(
                &request.request_id,
                self.provider_name(),
                &NormalizedUsage::new(usage.input_tokens, usage.output_tokens),
            );
        }

        let text = parsed.into_output_text()?;
        log_completion(&request.request_id, self.provider_name(), duration_ms, text.len());

        serde_json::from_str(&text)
            .map_err(|e| ProviderError::SchemaViolation(format!("output is not valid JSON: {}", e)))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::schema::sentiment_schema;
    use serde_json::json;
    use std::time::Duration;

    fn test_config(api_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            api_key: api_key.map(str::to_string),
            base_url: "https://api.openai.com/v1/".to_string(),
            model: "gpt-4.1-mini".to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(1),
        }
    }

    fn parse(body: Value) -> ResponsesResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let schema = sentiment_schema();
        let body = serde_json::to_value(ResponsesRequest::new(
            "gpt-4.1-mini",
            "Analyze sentiment of this comment: hi",
            &schema,
        ))
        .unwrap();

        assert_eq!(body["model"], "gpt-4.1-mini");
        assert_eq!(body["input"], "Analyze sentiment of this comment: hi");
        assert_eq!(body["store"], false);
        assert_eq!(body["text"]["format"]["type"], "json_schema");
        assert_eq!(body["text"]["format"]["name"], "sentiment_schema");
        assert_eq!(body["text"]["format"]["strict"], true);
        assert_eq!(body["text"]["format"]["schema"], schema.schema);
    }

    #[test]
    fn test_responses_url_strips_trailing_slash() {
        let client = OpenAiClient::new(&test_config(Some("sk-test")));
        assert_eq!(client.responses_url(), "https://api.openai.com/v1/responses");
        assert!(client.has_api_key());
        assert_eq!(client.model(), "gpt-4.1-mini");
    }

    #[test]
    fn test_output_text_skips_reasoning_items() {
        let response = parse(json!({
            "id": "resp_1",
            "status": "completed",
            "output": [
                { "type": "reasoning", "summary": [] },
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        { "type": "output_text", "text": "{\"sentiment\":\"positive\",", "annotations": [] },
                        { "type": "output_text", "text": "\"rating\":5}", "annotations": [] }
                    ]
                }
            ]
        }));
        assert_eq!(
            response.into_output_text().unwrap(),
            "{\"sentiment\":\"positive\",\"rating\":5}"
        );
    }

    #[test]
    fn test_refusal_is_reported() {
        let response = parse(json!({
            "status": "completed",
            "output": [{
                "type": "message",
                "content": [{ "type": "refusal", "refusal": "I can't help with that." }]
            }]
        }));
        let err = response.into_output_text().unwrap_err();
        assert!(matches!(err, ProviderError::Refusal(ref r) if r == "I can't help with that."));
    }

    #[test]
    fn test_incomplete_status() {
        let response = parse(json!({
            "status": "incomplete",
            "incomplete_details": { "reason": "max_output_tokens" },
            "output": []
        }));
        let err = response.into_output_text().unwrap_err();
        assert!(matches!(err, ProviderError::Incomplete(ref r) if r == "max_output_tokens"));
    }

    #[test]
    fn test_empty_output_is_malformed() {
        let response = parse(json!({ "status": "completed", "output": [] }));
        assert!(matches!(
            response.into_output_text().unwrap_err(),
            ProviderError::MalformedResponse(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_call_time() {
        let client = OpenAiClient::new(&test_config(None));
        assert!(!client.has_api_key());

        let request = StructuredRequest::new("hello", sentiment_schema());
        let err = client.generate_structured(&request).await.unwrap_err();
        assert!(matches!(err, ProviderError::Authentication(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
