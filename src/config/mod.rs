// src/config/mod.rs
// Environment-based configuration for the provider client and HTTP surface

use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::llm::http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::llm::openai::OPENAI_API_KEY_ENV;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
/// Request body limit on `/comment` (64KB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Model provider settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// OPENAI_API_KEY; absence surfaces on the first call, not at startup
    pub api_key: Option<String>,
    /// OPENAI_BASE_URL
    pub base_url: String,
    /// SENTIMENT_MODEL
    pub model: String,
    /// SENTIMENT_REQUEST_TIMEOUT_SECS
    pub request_timeout: Duration,
    /// SENTIMENT_CONNECT_TIMEOUT_SECS
    pub connect_timeout: Duration,
}

/// Full service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub provider: ProviderConfig,
    /// SENTIMENT_MAX_BODY_BYTES
    pub max_body_bytes: usize,
}

impl ServiceConfig {
    /// Load configuration from process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = read_key(&lookup, OPENAI_API_KEY_ENV);
        let base_url = read_key(&lookup, "OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = read_key(&lookup, "SENTIMENT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let request_timeout = Duration::from_secs(var_or(
            &lookup,
            "SENTIMENT_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ));
        let connect_timeout = Duration::from_secs(var_or(
            &lookup,
            "SENTIMENT_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        ));
        let max_body_bytes = var_or(&lookup, "SENTIMENT_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES);

        Self {
            provider: ProviderConfig {
                api_key,
                base_url,
                model,
                request_timeout,
                connect_timeout,
            },
            max_body_bytes,
        }
    }

    /// Check the loaded values. A missing API key is only a warning.
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.provider.api_key.is_none() {
            validation.add_warning(format!(
                "{} is not set - every /comment request will fail with an authentication error",
                OPENAI_API_KEY_ENV
            ));
        }

        match Url::parse(&self.provider.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => validation.add_error(format!(
                "OPENAI_BASE_URL must use http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => validation.add_error(format!(
                "OPENAI_BASE_URL '{}' is not a valid URL: {}",
                self.provider.base_url, e
            )),
        }

        if self.provider.request_timeout.is_zero() {
            validation.add_error("SENTIMENT_REQUEST_TIMEOUT_SECS must be greater than 0");
        }
        if self.provider.connect_timeout.is_zero() {
            validation.add_error("SENTIMENT_CONNECT_TIMEOUT_SECS must be greater than 0");
        }
        if self.provider.connect_timeout > self.provider.request_timeout {
            validation.add_warning("connect timeout exceeds request timeout and will never fire");
        }
        if self.max_body_bytes == 0 {
            validation.add_error("SENTIMENT_MAX_BODY_BYTES must be greater than 0");
        }

        validation
    }
}

/// Read a single value, filtering empty strings
fn read_key<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a value, tolerating trailing `# comments`; fall back to the default on failure
fn var_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    let clean = raw.split('#').next().unwrap_or("").trim();
    match clean.parse::<T>() {
        Ok(parsed) => {
            debug!(key = key, value = %parsed, "Config value from environment");
            parsed
        }
        Err(_) => {
            warn!(key = key, value = %raw, default = %default, "Config parse failed, using default");
            default
        }
    }
}

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warning in &self.warnings {
                lines.push(format!("  - {}", warning));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}
