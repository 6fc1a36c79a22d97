// src/api/error.rs
// Error envelope for HTTP responses

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

use crate::error::{ProviderError, SentimentError};

/// Standard API error response format
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
    pub retryable: Option<bool>,
}

impl ApiError {
    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: Some("BAD_REQUEST".to_string()),
            retryable: None,
        }
    }

    /// Create an internal server error carrying a provider failure
    pub fn external_service(err: &ProviderError) -> Self {
        Self {
            message: err.to_string(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: Some("EXTERNAL_SERVICE_ERROR".to_string()),
            retryable: Some(err.is_retryable()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "detail": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }
        if let Some(retryable) = self.retryable {
            response_json["retryable"] = json!(retryable);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

impl From<SentimentError> for ApiError {
    fn from(err: SentimentError) -> Self {
        match err {
            SentimentError::Validation(message) => ApiError::bad_request(message),
            SentimentError::ExternalService(provider_err) => {
                error!(
                    kind = provider_err.kind(),
                    retryable = provider_err.is_retryable(),
                    error = %provider_err,
                    "External service error"
                );
                ApiError::external_service(&provider_err)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(status = %rejection.status(), "Rejected request body: {}", rejection.body_text());
        let mut error = ApiError::bad_request(rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            error.status_code = StatusCode::PAYLOAD_TOO_LARGE;
            error.error_code = Some("PAYLOAD_TOO_LARGE".to_string());
        }
        error
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
