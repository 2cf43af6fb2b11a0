// ABOUTME: LLM provider abstraction layer for structured completions
// ABOUTME: Defines the provider contract, message types and JSON-schema response formats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Service Provider Interface
//!
//! The router and the meal planner never talk to a model endpoint directly.
//! They go through [`StructuredLlmClient`], which sends role-tagged messages
//! with a JSON-schema response format to an [`LlmProvider`] and validates the
//! reply against that schema before handing back a typed value.
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: Bitflags describing provider features
//! - **`LlmProvider`**: Async trait for a single non-streaming chat completion
//! - **`ResponseFormat`**: Strict JSON-schema output contract sent with a request
//! - **`StructuredLlmClient`**: Parse-don't-trust wrapper returning `Option<T>`
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mealplan_server::llm::{OpenAiCompatibleProvider, OutputSchema, StructuredLlmClient};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct Answer { text: String }
//!
//! async fn example() -> Result<(), mealplan_server::errors::AppError> {
//!     let provider = Arc::new(OpenAiCompatibleProvider::from_env()?);
//!     let client = StructuredLlmClient::new(provider, "gpt-4o-mini");
//!     let schema = OutputSchema::new("answer", json!({
//!         "type": "object",
//!         "properties": { "text": { "type": "string" } },
//!         "required": ["text"],
//!         "additionalProperties": false
//!     }));
//!     let answer: Option<Answer> = client.complete("Be brief.", "Hi", &schema).await?;
//!     Ok(())
//! }
//! ```

mod openai_compatible;
pub mod prompts;
pub mod schema;
mod structured;

pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use schema::{OutputSchema, SchemaViolation};
pub use structured::StructuredLlmClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider accepts system messages
        const SYSTEM_MESSAGES = 0b0000_0001;
        /// Provider honours strict JSON-schema response formats
        const JSON_SCHEMA = 0b0000_0010;
        /// Provider can persist completions server-side when asked
        const STORED_COMPLETIONS = 0b0000_0100;
    }
}

impl LlmCapabilities {
    /// Capabilities of the hosted `OpenAI` chat completions endpoint
    #[must_use]
    pub const fn openai() -> Self {
        Self::SYSTEM_MESSAGES
            .union(Self::JSON_SCHEMA)
            .union(Self::STORED_COMPLETIONS)
    }

    /// Check if strict structured output is supported
    #[must_use]
    pub const fn supports_json_schema(&self) -> bool {
        self.contains(Self::JSON_SCHEMA)
    }

    /// Check if stored completions are supported
    #[must_use]
    pub const fn supports_stored_completions(&self) -> bool {
        self.contains(Self::STORED_COMPLETIONS)
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Strict JSON-schema output contract attached to a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Schema name reported to the endpoint
    pub name: String,
    /// JSON schema the reply must conform to
    pub schema: Value,
    /// Whether the endpoint must enforce the schema strictly
    pub strict: bool,
}

impl From<&OutputSchema> for ResponseFormat {
    fn from(schema: &OutputSchema) -> Self {
        Self {
            name: schema.name().to_owned(),
            schema: schema.schema().clone(),
            strict: true,
        }
    }
}

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier (provider-specific)
    pub model: Option<String>,
    /// Structured output contract
    pub response_format: Option<ResponseFormat>,
    /// Ask the endpoint to store the completion
    pub store: bool,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            response_format: None,
            store: false,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attach a structured output contract
    #[must_use]
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Ask the endpoint to store the completion
    #[must_use]
    pub const fn with_store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content, absent when the model refused
    pub content: Option<String>,
    /// Refusal text when the model declined to answer
    pub refusal: Option<String>,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
///
/// Implementations must be safe to share across concurrent calls: one
/// provider instance serves every fan-out branch of a request.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "openai", "ollama")
    fn name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;

    /// Check if the provider is reachable and the API key is valid
    async fn health_check(&self) -> Result<bool, AppError>;
}
