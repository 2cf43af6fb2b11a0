// ABOUTME: OpenAI-compatible chat completions provider with strict JSON-schema output
// ABOUTME: Works against api.openai.com and any endpoint implementing the same API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Sends `chat/completions` requests carrying a
//! `response_format: { type: "json_schema", ... }` block and reports the
//! model's content or refusal back to the caller untouched. Schema
//! validation happens one layer up, in [`super::StructuredLlmClient`].
//!
//! ## Configuration
//!
//! - `MEALPLAN_LLM_BASE_URL`: Base URL (default: <https://api.openai.com/v1>)
//! - `OPENAI_API_KEY`: API key (optional for local servers)

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::constants::{env_vars, models};
use crate::errors::{AppError, ErrorCode};

/// Service label used in error messages
const SERVICE_NAME: &str = "OpenAI";

/// Connection timeout
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Request timeout, the only ceiling on a slow completion
const REQUEST_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAiResponseFormat<'a>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    store: bool,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OpenAiMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

#[derive(Debug, Serialize)]
struct OpenAiResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: OpenAiJsonSchema<'a>,
}

#[derive(Debug, Serialize)]
struct OpenAiJsonSchema<'a> {
    name: &'a str,
    schema: &'a Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <https://api.openai.com/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Capabilities of this endpoint
    pub capabilities: LlmCapabilities,
}

impl OpenAiCompatibleConfig {
    /// Configuration for an arbitrary base URL without credentials
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self {
            base_url: models::DEFAULT_LLM_BASE_URL.to_owned(),
            api_key: None,
            default_model: models::DEFAULT_RECIPES_MODEL.to_owned(),
            capabilities: LlmCapabilities::openai(),
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a provider from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = env::var(env_vars::LLM_BASE_URL)
            .unwrap_or_else(|_| models::DEFAULT_LLM_BASE_URL.to_owned());
        let api_key = env::var(env_vars::OPENAI_API_KEY)
            .ok()
            .filter(|k| !k.is_empty());

        Self::new(OpenAiCompatibleConfig {
            base_url,
            api_key,
            ..OpenAiCompatibleConfig::default()
        })
    }

    /// Endpoint configuration
    #[must_use]
    pub const fn config(&self) -> &OpenAiCompatibleConfig {
        &self.config
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.bearer_auth(api_key)
        } else {
            request
        }
    }

    fn connect_error(&self, e: &reqwest::Error) -> AppError {
        if e.is_connect() {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Cannot connect to {}", self.config.base_url),
            )
        } else if e.is_timeout() {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("{SERVICE_NAME}: request timed out"),
            )
        } else {
            AppError::external_service(SERVICE_NAME, format!("Failed to connect: {e}"))
        }
    }

    /// Parse error response from API
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) else {
            return AppError::external_service(
                SERVICE_NAME,
                format!(
                    "API error ({status}): {}",
                    body.chars().take(200).collect::<String>()
                ),
            );
        };

        let detail = error_response.error;
        match status.as_u16() {
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("API authentication failed: {}", detail.message),
            ),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("LLM rate limit reached: {}", detail.message),
            ),
            400 => AppError::invalid_input(format!("API validation error: {}", detail.message)),
            404 => AppError::not_found(format!("Model or endpoint ({})", detail.message)),
            _ => AppError::external_service(
                SERVICE_NAME,
                format!(
                    "{} - {}",
                    detail.error_type.as_deref().unwrap_or("unknown"),
                    detail.message
                ),
            ),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let response_format = request
            .response_format
            .as_ref()
            .map(|format| OpenAiResponseFormat {
                format_type: "json_schema",
                json_schema: OpenAiJsonSchema {
                    name: &format.name,
                    schema: &format.schema,
                    strict: format.strict,
                },
            });

        let openai_request = OpenAiRequest {
            model,
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            response_format,
            store: request.store && self.config.capabilities.supports_stored_completions(),
        };

        debug!(
            "Sending chat completion with {} messages, schema={:?}",
            openai_request.messages.len(),
            request.response_format.as_ref().map(|f| f.name.as_str())
        );

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to {}: {}", self.config.base_url, e);
                self.connect_error(&e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {}", e);
            AppError::external_service(SERVICE_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse API response: {} - body: {}",
                e,
                body.chars().take(500).collect::<String>()
            );
            AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
        })?;

        let Some(choice) = openai_response.choices.into_iter().next() else {
            warn!("{} returned no choices", SERVICE_NAME);
            return Ok(ChatResponse {
                model: openai_response.model,
                ..ChatResponse::default()
            });
        };

        debug!(
            "Received response: content={:?} chars, refusal={}, finish_reason={:?}",
            choice.message.content.as_ref().map(String::len),
            choice.message.refusal.is_some(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content: choice.message.content,
            refusal: choice.message.refusal,
            model: openai_response.model,
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .add_auth_header(self.client.get(self.api_url("models")))
            .send()
            .await
            .map_err(|e| {
                error!("Health check against {} failed: {}", self.config.base_url, e);
                self.connect_error(&e)
            })?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!("Health check failed with status: {}", response.status());
        }
        Ok(healthy)
    }
}
