// ABOUTME: Shared test utilities and fakes for integration tests
// ABOUTME: Provides a scripted LLM provider, configurable action handlers and inventory fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `mealplan_server`

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use mealplan_server::errors::{AppError, AppResult, ErrorCode};
use mealplan_server::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use mealplan_server::models::{ActionRequest, Appliance, Cookware, Ingredient, InventorySnapshot};
use mealplan_server::router::ActionHandler;
use serde_json::Value;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Scripted LLM provider
// ============================================================================

/// What the scripted provider answers for one schema name
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Message content
    Content(String),
    /// Model refusal
    Refusal(String),
    /// No choices at all
    Empty,
    /// Transport or upstream failure
    Error(ErrorCode, String),
}

/// LLM provider answering from a per-schema script and recording every request
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<HashMap<String, ScriptedReply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer requests for `schema` with `value` serialized as JSON content
    pub fn reply_json(&self, schema: &str, value: &Value) {
        self.script(schema, ScriptedReply::Content(value.to_string()));
    }

    pub fn script(&self, schema: &str, reply: ScriptedReply) {
        self.replies
            .lock()
            .unwrap()
            .insert(schema.to_owned(), reply);
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, schema: &str) -> Vec<ChatRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.response_format.as_ref().is_some_and(|f| f.name == schema))
            .collect()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::openai()
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let schema = request
            .response_format
            .as_ref()
            .map(|f| f.name.clone())
            .unwrap_or_default();
        let reply = self.replies.lock().unwrap().get(&schema).cloned();

        let model = request.model.clone().unwrap_or_default();
        match reply {
            Some(ScriptedReply::Content(content)) => Ok(ChatResponse {
                content: Some(content),
                model,
                finish_reason: Some("stop".to_owned()),
                ..ChatResponse::default()
            }),
            Some(ScriptedReply::Refusal(refusal)) => Ok(ChatResponse {
                refusal: Some(refusal),
                model,
                ..ChatResponse::default()
            }),
            Some(ScriptedReply::Empty) => Ok(ChatResponse {
                model,
                ..ChatResponse::default()
            }),
            Some(ScriptedReply::Error(code, message)) => Err(AppError::new(code, message)),
            None => Err(AppError::external_service(
                "scripted",
                format!("no reply scripted for schema '{schema}'"),
            )),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

// ============================================================================
// Action handlers
// ============================================================================

/// Handler that sleeps, then returns a fixed value
pub struct DelayedHandler {
    pub delay: Duration,
    pub response: Value,
    pub seen: Mutex<Vec<ActionRequest>>,
}

impl DelayedHandler {
    pub fn new(delay_ms: u64, response: Value) -> Arc<Self> {
        Arc::new(Self {
            delay: Duration::from_millis(delay_ms),
            response,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<ActionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActionHandler for DelayedHandler {
    async fn handle(&self, request: &ActionRequest) -> AppResult<Value> {
        self.seen.lock().unwrap().push(request.clone());
        tokio::time::sleep(self.delay).await;
        Ok(self.response.clone())
    }
}

/// Handler that sleeps, then fails
pub struct FailingHandler {
    pub delay: Duration,
    pub message: String,
}

impl FailingHandler {
    pub fn new(delay_ms: u64, message: &str) -> Arc<Self> {
        Arc::new(Self {
            delay: Duration::from_millis(delay_ms),
            message: message.to_owned(),
        })
    }
}

#[async_trait]
impl ActionHandler for FailingHandler {
    async fn handle(&self, _request: &ActionRequest) -> AppResult<Value> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::internal(self.message.clone()))
    }
}

// ============================================================================
// Inventory fixtures
// ============================================================================

pub fn ingredient(owner: &str, name: &str, quantity: f64, allergens: &[&str]) -> Ingredient {
    Ingredient {
        id: uuid::Uuid::new_v4().to_string(),
        owner: owner.to_owned(),
        name: name.to_owned(),
        quantity,
        unit: "Count".to_owned(),
        kind: None,
        storage: None,
        expiration_date: NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
        allergens: allergens.iter().map(|a| (*a).to_owned()).collect(),
    }
}

pub fn cookware(owner: &str, name: &str, quantity: i64) -> Cookware {
    Cookware {
        id: uuid::Uuid::new_v4().to_string(),
        owner: owner.to_owned(),
        name: name.to_owned(),
        quantity,
    }
}

pub fn appliance(owner: &str, name: &str, available: bool) -> Appliance {
    Appliance {
        id: uuid::Uuid::new_v4().to_string(),
        owner: owner.to_owned(),
        name: name.to_owned(),
        available,
    }
}

/// A small kitchen for `owner`
pub fn demo_snapshot(owner: &str) -> InventorySnapshot {
    InventorySnapshot {
        ingredients: vec![
            ingredient(owner, "Eggs", 6.0, &["egg"]),
            ingredient(owner, "Spinach", 1.0, &[]),
        ],
        cookware: vec![cookware(owner, "Frying pan", 1)],
        appliances: vec![appliance(owner, "Stove", true)],
    }
}

/// A schema-conforming meal plan reply
pub fn meal_plan_json() -> Value {
    serde_json::json!({
        "responseString": "Here is a quick dinner.",
        "recipes": [{
            "name": "Spinach Omelette",
            "description": "Fluffy eggs folded over wilted spinach",
            "ingredients": ["3 eggs", "1 handful spinach"],
            "instructions": ["Whisk the eggs", "Wilt the spinach", "Cook and fold"],
            "cookwareNeeded": ["Frying pan"],
            "appliancesNeeded": ["Stove"],
            "preparationTime": 5,
            "cookingTime": 8,
            "totalTime": 13,
            "caloriesPerServing": 280,
            "servings": 1
        }]
    })
}
