// ABOUTME: Integration tests for the OpenAI-compatible provider against a local mock server
// ABOUTME: Validates request shape, structured output plumbing, error mapping and from_env parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use mealplan_server::errors::ErrorCode;
use mealplan_server::llm::{
    ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
    OutputSchema, ResponseFormat, StructuredLlmClient,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer, api_key: Option<&str>) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
        base_url: format!("{}/v1", server.uri()),
        api_key: api_key.map(ToOwned::to_owned),
        ..OpenAiCompatibleConfig::default()
    })
    .unwrap()
}

fn greeting_schema() -> OutputSchema {
    OutputSchema::new(
        "greeting",
        json!({
            "type": "object",
            "properties": { "text": { "type": "string" } },
            "required": ["text"],
            "additionalProperties": false
        }),
    )
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content, "refusal": null },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17 }
    })
}

fn structured_request(schema: &OutputSchema) -> ChatRequest {
    ChatRequest::new(vec![ChatMessage::system("Be brief."), ChatMessage::user("Hi")])
        .with_model("gpt-4o-mini")
        .with_response_format(ResponseFormat::from(schema))
}

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn test_sends_json_schema_response_format_with_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "Be brief." },
                { "role": "user", "content": "Hi" }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": { "name": "greeting", "strict": true }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(r#"{"text":"hello"}"#)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Some("sk-test"));
    let response = provider
        .complete(&structured_request(&greeting_schema()))
        .await
        .unwrap();

    assert_eq!(response.content.as_deref(), Some(r#"{"text":"hello"}"#));
    assert!(response.refusal.is_none());
    assert_eq!(response.model, "gpt-4o-mini");
    assert_eq!(response.usage.unwrap().total_tokens, 17);
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
}

#[tokio::test]
async fn test_store_flag_is_sent_only_when_requested() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "store": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("stored")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("not stored")))
        .mount(&server)
        .await;

    let provider = provider_for(&server, None);
    let request = structured_request(&greeting_schema());

    let plain = provider.complete(&request).await.unwrap();
    assert_eq!(plain.content.as_deref(), Some("not stored"));

    let stored = provider.complete(&request.with_store(true)).await.unwrap();
    assert_eq!(stored.content.as_deref(), Some("stored"));
}

// =============================================================================
// Response handling
// =============================================================================

#[tokio::test]
async fn test_refusal_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "message": { "role": "assistant", "content": null, "refusal": "I can't help with that." },
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;

    let response = provider_for(&server, None)
        .complete(&structured_request(&greeting_schema()))
        .await
        .unwrap();

    assert!(response.content.is_none());
    assert_eq!(response.refusal.as_deref(), Some("I can't help with that."));
}

#[tokio::test]
async fn test_no_choices_is_an_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "model": "gpt-4o-mini", "choices": [] })),
        )
        .mount(&server)
        .await;

    let response = provider_for(&server, None)
        .complete(&structured_request(&greeting_schema()))
        .await
        .unwrap();
    assert!(response.content.is_none());
    assert!(response.refusal.is_none());
}

// =============================================================================
// Error mapping
// =============================================================================

async fn error_code_for(status: u16, body: serde_json::Value) -> ErrorCode {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;

    provider_for(&server, Some("sk-bad"))
        .complete(&structured_request(&greeting_schema()))
        .await
        .unwrap_err()
        .code
}

#[tokio::test]
async fn test_upstream_error_statuses_are_mapped() {
    let detail = |kind: &str| json!({ "error": { "message": "nope", "type": kind } });

    assert_eq!(
        error_code_for(401, detail("invalid_request_error")).await,
        ErrorCode::ExternalAuthFailed
    );
    assert_eq!(
        error_code_for(429, detail("rate_limit_exceeded")).await,
        ErrorCode::ExternalRateLimited
    );
    assert_eq!(
        error_code_for(400, detail("invalid_request_error")).await,
        ErrorCode::InvalidInput
    );
    assert_eq!(
        error_code_for(500, detail("server_error")).await,
        ErrorCode::ExternalServiceError
    );
    assert_eq!(
        error_code_for(502, json!("bad gateway")).await,
        ErrorCode::ExternalServiceError
    );
}

#[tokio::test]
async fn test_connection_failure_is_unavailable() {
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::with_base_url(
        "http://127.0.0.1:9/v1",
    ))
    .unwrap();

    let error = provider
        .complete(&structured_request(&greeting_schema()))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
}

#[tokio::test]
async fn test_health_check_lists_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    assert!(provider_for(&server, Some("sk-test")).health_check().await.unwrap());
}

// =============================================================================
// Structured client over HTTP
// =============================================================================

#[derive(Debug, Deserialize, PartialEq)]
struct Greeting {
    text: String,
}

#[tokio::test]
async fn test_structured_client_validates_reply_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(r#"{"text":7}"#)))
        .mount(&server)
        .await;

    let client = StructuredLlmClient::new(Arc::new(provider_for(&server, None)), "gpt-4o-mini");
    let parsed: Option<Greeting> = client
        .complete("Be brief.", "Hi", &greeting_schema())
        .await
        .unwrap();
    assert!(parsed.is_none());
}

// =============================================================================
// from_env
// =============================================================================

mod from_env {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear() {
        env::remove_var("MEALPLAN_LLM_BASE_URL");
        env::remove_var("OPENAI_API_KEY");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear();
        let provider = OpenAiCompatibleProvider::from_env().unwrap();
        assert_eq!(provider.config().base_url, "https://api.openai.com/v1");
        assert!(provider.config().api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values_and_empty_key_ignored() {
        clear();
        env::set_var("MEALPLAN_LLM_BASE_URL", "http://localhost:11434/v1");
        env::set_var("OPENAI_API_KEY", "");
        let provider = OpenAiCompatibleProvider::from_env().unwrap();
        assert_eq!(provider.config().base_url, "http://localhost:11434/v1");
        assert!(provider.config().api_key.is_none());

        env::set_var("OPENAI_API_KEY", "sk-live");
        let provider = OpenAiCompatibleProvider::from_env().unwrap();
        assert_eq!(provider.config().api_key.as_deref(), Some("sk-live"));
        clear();
    }
}
