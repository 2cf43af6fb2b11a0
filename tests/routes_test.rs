// ABOUTME: HTTP-level tests for the health, router and recipe endpoints
// ABOUTME: Drives the assembled axum router in-process with scripted model replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use common::{demo_snapshot, meal_plan_json, ScriptedProvider};
use http::{Request, StatusCode};
use mealplan_server::config::ServerConfig;
use mealplan_server::inventory::InMemoryInventoryStore;
use mealplan_server::recipes::RecipeGenerator;
use mealplan_server::router::{ActionRegistry, QueryClassifier, QueryRouter};
use mealplan_server::routes::{build_router, ServerResources};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(provider: &Arc<ScriptedProvider>) -> Router {
    let store = Arc::new(InMemoryInventoryStore::with_snapshot(demo_snapshot("owner-1")));
    let generator = RecipeGenerator::new(store, provider.clone(), "recipes-model");
    let router = QueryRouter::new(
        QueryClassifier::new(provider.clone(), "router-model"),
        Arc::new(ActionRegistry::standard(generator.clone())),
    );
    build_router(Arc::new(ServerResources::new(
        router,
        generator,
        Arc::new(ServerConfig::default()),
    )))
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_service_identity() {
    let provider = ScriptedProvider::new();
    let response = app(&provider)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mealplan-server");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_router_endpoint_returns_results_envelope() {
    let provider = ScriptedProvider::new();
    provider.reply_json(
        "query_classification",
        &json!({ "queries": [
            { "category": "generate-recipes", "query": "Plan dinner" },
            { "category": "manage-inventory", "query": "Add two onions" }
        ]}),
    );
    provider.reply_json("mealPlan", &meal_plan_json());

    let body = json!({ "arguments": { "query": "Plan dinner and add two onions", "owner": "owner-1" } });
    let response = app(&provider)
        .oneshot(post_json("/api/router", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "responseString": "Here is your response:",
            "results": [
                { "functionName": "generate-recipes", "response": meal_plan_json() },
                { "functionName": "manage-inventory", "response": null }
            ]
        })
    );
}

#[tokio::test]
async fn test_router_endpoint_reports_missing_owner_in_envelope() {
    let provider = ScriptedProvider::new();
    let body = json!({ "arguments": { "query": "Plan dinner" } });

    let response = app(&provider)
        .oneshot(post_json("/api/router", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "responseString": "An error occurred while processing your request.",
            "error": "Missing required parameters: query and owner."
        })
    );
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_recipes_endpoint_generates_plan() {
    let provider = ScriptedProvider::new();
    provider.reply_json("mealPlan", &meal_plan_json());
    let body = json!({ "arguments": { "query": "Something with eggs", "owner": "owner-1" } });

    let response = app(&provider)
        .oneshot(post_json("/api/recipes/generate", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, meal_plan_json());
    assert_eq!(provider.requests_for("mealPlan").len(), 1);
    assert!(provider.requests_for("query_classification").is_empty());
}

#[tokio::test]
async fn test_recipes_endpoint_without_arguments_returns_failure_envelope() {
    let provider = ScriptedProvider::new();

    let response = app(&provider)
        .oneshot(post_json("/api/recipes/generate", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "responseString": "An error occurred while generating your meal plan.",
            "recipes": [],
            "error": "Missing required parameters: query and owner."
        })
    );
}

#[tokio::test]
async fn test_malformed_json_is_rejected_with_invalid_input() {
    let provider = ScriptedProvider::new();

    for uri in ["/api/router", "/api/recipes/generate"] {
        let response = app(&provider)
            .oneshot(post_json(uri, "{ not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert!(body["error"]["message"].is_string());
    }
    assert!(provider.requests().is_empty());
}
