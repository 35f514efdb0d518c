//! Model provider transport.
//!
//! The invoker talks to the remote model through [`GenerationTransport`]. The production
//! implementation is [`GeminiClient`], which POSTs the request body to a
//! `generateContent` endpoint. Endpoint, model and credential come from configuration.

use crate::error::GenerationError;
use crate::request::GenerationRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// One request, one response. Implementations must not retry on their own.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// Send the request and return the raw response body of a successful (2xx) response.
    ///
    /// Non-success statuses and network failures are reported as
    /// [`GenerationError::Transport`].
    async fn send(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Human-readable target, for logs.
    fn target(&self) -> String;
}

/// Provider configuration (`[provider]` table).
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL, without the `/models/...` suffix.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Inline credential. Prefer `api_key_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable consulted when `api_key` is unset.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout. Unset means the round trip is not time-limited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            api_key_env: default_api_key_env(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!(
                "Invalid endpoint URL: {} (must start with http:// or https://)",
                self.endpoint
            ));
        }
        if self.api_key.is_none() && self.api_key_env.trim().is_empty() {
            return Err("Either api_key or api_key_env must be set".to_string());
        }
        Ok(())
    }

    /// Full URL of the `generateContent` method for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// Resolve the credential: inline key first, then the named environment variable.
    pub fn resolve_api_key(&self) -> Result<String, GenerationError> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.clone());
        }
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(GenerationError::Config(format!(
                "No API key configured. Set {} or provider.api_key.",
                self.api_key_env
            ))),
        }
    }
}

fn build_provider_http_client(config: &ProviderConfig) -> Result<Client, GenerationError> {
    let mut builder =
        Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_secs));
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| GenerationError::Config(format!("Failed to create HTTP client: {}", e)))
}

fn map_http_error(error: reqwest::Error) -> GenerationError {
    let message = if error.is_timeout() {
        format!("Request timeout: {}", error)
    } else if error.is_connect() {
        format!("Connection error: {}", error)
    } else {
        format!("HTTP error: {}", error)
    };
    GenerationError::Transport {
        status: error.status().map(|s| s.as_u16()),
        message,
    }
}

/// Longest error body echoed back in a transport failure.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP transport for `generateContent` endpoints.
pub struct GeminiClient {
    client: Client,
    url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client with an explicit credential.
    pub fn new(config: &ProviderConfig, api_key: String) -> Result<Self, GenerationError> {
        config.validate().map_err(GenerationError::Config)?;
        Ok(Self {
            client: build_provider_http_client(config)?,
            url: config.generate_url(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Build a client, resolving the credential from the configuration or environment.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, GenerationError> {
        let api_key = config.resolve_api_key()?;
        Self::new(config, api_key)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerationTransport for GeminiClient {
    async fn send(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        debug!(url = %self.url, "Sending generation request");

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request.to_body())
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = match error_text.trim() {
                "" => status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
                text => text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            };
            return Err(GenerationError::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }

        response.text().await.map_err(map_http_error)
    }

    fn target(&self) -> String {
        format!("{} ({})", self.model, self.url)
    }
}
