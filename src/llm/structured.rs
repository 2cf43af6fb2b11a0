// ABOUTME: Structured completion client returning schema-validated typed values
// ABOUTME: Transport failures are errors; refusals and malformed replies become None
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, OutputSchema, ResponseFormat};
use crate::errors::AppResult;

/// Sends one system + user exchange and returns a value conforming to a schema
///
/// No retries and no caching: callers invoke once and substitute their own
/// safe default when the result is `None`.
#[derive(Clone)]
pub struct StructuredLlmClient {
    provider: Arc<dyn LlmProvider>,
    model: String,
    store: bool,
}

impl StructuredLlmClient {
    /// Create a client bound to a provider and model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            store: false,
        }
    }

    /// Ask the endpoint to store completions made through this client
    #[must_use]
    pub const fn with_store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }

    /// Model this client requests
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a structured completion
    ///
    /// Returns `Ok(None)` when the model refuses, returns no content, returns
    /// content that is not JSON, or returns JSON that violates `schema` or
    /// cannot be deserialized into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the provider call itself fails (network,
    /// timeout, authentication, upstream error status).
    #[instrument(skip_all, fields(schema = %schema.name(), model = %self.model))]
    pub async fn complete<T>(
        &self,
        system: &str,
        user: &str,
        schema: &OutputSchema,
    ) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let capabilities = self.provider.capabilities();
        if !capabilities.supports_json_schema() {
            warn!(
                provider = self.provider.name(),
                "Provider does not advertise JSON-schema output; reply will still be validated"
            );
        }

        let request = ChatRequest::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
            .with_model(&self.model)
            .with_response_format(ResponseFormat::from(schema))
            .with_store(self.store);

        let response = self.provider.complete(&request).await?;
        Ok(parse_structured(&response, schema))
    }
}

/// Turn a raw completion into a typed value, or `None` if it is unusable
pub(crate) fn parse_structured<T>(response: &ChatResponse, schema: &OutputSchema) -> Option<T>
where
    T: DeserializeOwned,
{
    if let Some(refusal) = &response.refusal {
        warn!(schema = schema.name(), "Model refused structured output: {refusal}");
        return None;
    }

    let Some(content) = response.content.as_deref().filter(|c| !c.trim().is_empty()) else {
        warn!(schema = schema.name(), "Model returned no content");
        return None;
    };

    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            warn!(schema = schema.name(), "Model reply is not JSON: {e}");
            debug!(
                "Reply preview: {}",
                content.chars().take(200).collect::<String>()
            );
            return None;
        }
    };

    if let Err(violation) = schema.validate(&value) {
        warn!(schema = schema.name(), "Model reply violates schema at {violation}");
        return None;
    }

    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(schema = schema.name(), "Model reply failed typed parse: {e}");
            None
        }
    }
}
