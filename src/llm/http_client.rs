// src/llm/http_client.rs
// Shared HTTP client configuration for model provider calls

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use crate::error::ProviderError;

/// Default request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP client with explicit timeouts. Each call is a single attempt.
pub struct LlmHttpClient {
    client: Client,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl LlmHttpClient {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            request_timeout,
            connect_timeout,
        }
    }

    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// POST a JSON body with Bearer auth and return the response body on success.
    ///
    /// 401/403 become `Authentication`, any other non-2xx becomes `Api`.
    pub async fn post_json(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if status.is_success() {
            return Ok(text);
        }

        let message = api_error_message(&text);
        warn!(
            request_id = %request_id,
            status = %status,
            error = %message,
            "Model provider returned an error status"
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ProviderError::Authentication(message))
            }
            _ => Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }

    fn classify(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.request_timeout)
        } else if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// Pull `error.message` out of an OpenAI-style error envelope, else return the raw body
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response body".to_string()
            } else {
                trimmed.to_string()
            }
        })
}
