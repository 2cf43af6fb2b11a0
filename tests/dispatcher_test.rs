// ABOUTME: Integration tests for concurrent action dispatch
// ABOUTME: Covers failure isolation, order preservation, unregistered categories and concurrency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use common::{DelayedHandler, FailingHandler};
use mealplan_server::errors::AppResult;
use mealplan_server::models::{ActionRequest, ClassifiedSubQuery, QueryCategory};
use mealplan_server::router::{
    ActionDispatcher, ActionHandler, ActionRegistry, HandlerOutcome, NoopHandler,
};
use serde_json::{json, Value};

fn sub(category: QueryCategory, query: &str) -> ClassifiedSubQuery {
    ClassifiedSubQuery::new(category, query)
}

#[tokio::test]
async fn test_failing_handler_does_not_affect_sibling() {
    let registry = ActionRegistry::builder()
        .register(QueryCategory::ProcessReceipt, FailingHandler::new(0, "receipt service down"))
        .register(QueryCategory::GenerateRecipes, DelayedHandler::new(40, json!("plan")))
        .build();
    let dispatcher = ActionDispatcher::new(Arc::new(registry));

    let outcomes = dispatcher
        .dispatch(
            "owner-1",
            &[
                sub(QueryCategory::ProcessReceipt, "Process receipt"),
                sub(QueryCategory::GenerateRecipes, "Plan dinner"),
            ],
        )
        .await;

    assert_eq!(
        outcomes,
        vec![
            HandlerOutcome::failure(QueryCategory::ProcessReceipt, "receipt service down"),
            HandlerOutcome::success(QueryCategory::GenerateRecipes, json!("plan")),
        ]
    );
    assert_eq!(
        serde_json::to_value(&outcomes[0]).unwrap()["responseString"],
        "Error handling request: process-receipt"
    );
}

#[tokio::test]
async fn test_failure_recorded_even_when_it_settles_last() {
    let registry = ActionRegistry::builder()
        .register(QueryCategory::ManageInventory, FailingHandler::new(50, "late failure"))
        .register(QueryCategory::EditPreferences, DelayedHandler::new(0, json!({ "ok": true })))
        .build();
    let dispatcher = ActionDispatcher::new(Arc::new(registry));

    let outcomes = dispatcher
        .dispatch(
            "owner-1",
            &[
                sub(QueryCategory::ManageInventory, "Remove eggs"),
                sub(QueryCategory::EditPreferences, "Go vegetarian"),
            ],
        )
        .await;

    assert!(outcomes[0].is_error());
    assert_eq!(
        outcomes[1],
        HandlerOutcome::success(QueryCategory::EditPreferences, json!({ "ok": true }))
    );
}

#[tokio::test]
async fn test_outcomes_keep_classification_order() {
    let registry = ActionRegistry::builder()
        .register(QueryCategory::GenerateRecipes, DelayedHandler::new(60, json!("A")))
        .register(QueryCategory::ManageInventory, DelayedHandler::new(30, json!("B")))
        .register(QueryCategory::ProcessReceipt, DelayedHandler::new(0, json!("C")))
        .build();
    let dispatcher = ActionDispatcher::new(Arc::new(registry));

    let outcomes = dispatcher
        .dispatch(
            "owner-1",
            &[
                sub(QueryCategory::GenerateRecipes, "a"),
                sub(QueryCategory::ManageInventory, "b"),
                sub(QueryCategory::ProcessReceipt, "c"),
            ],
        )
        .await;

    let names: Vec<QueryCategory> = outcomes.iter().map(HandlerOutcome::function_name).collect();
    assert_eq!(
        names,
        vec![
            QueryCategory::GenerateRecipes,
            QueryCategory::ManageInventory,
            QueryCategory::ProcessReceipt
        ]
    );
}

#[tokio::test]
async fn test_unregistered_category_produces_no_outcome() {
    let registry = ActionRegistry::builder()
        .register(QueryCategory::GenerateRecipes, DelayedHandler::new(0, json!("X")))
        .build();
    let dispatcher = ActionDispatcher::new(Arc::new(registry));

    let outcomes = dispatcher
        .dispatch(
            "owner-1",
            &[
                sub(QueryCategory::GenerateRecipes, "x"),
                sub(QueryCategory::EditPreferences, "y"),
            ],
        )
        .await;

    assert_eq!(
        outcomes,
        vec![HandlerOutcome::success(QueryCategory::GenerateRecipes, json!("X"))]
    );
}

#[tokio::test]
async fn test_noop_entry_still_appears_with_null_response() {
    let registry = ActionRegistry::builder()
        .register(QueryCategory::ManageInventory, Arc::new(NoopHandler))
        .build();
    let dispatcher = ActionDispatcher::new(Arc::new(registry));

    let outcomes = dispatcher
        .dispatch("owner-1", &[sub(QueryCategory::ManageInventory, "log groceries")])
        .await;

    assert_eq!(
        outcomes,
        vec![HandlerOutcome::success(QueryCategory::ManageInventory, Value::Null)]
    );
}

#[tokio::test]
async fn test_handlers_run_concurrently_with_owner_and_fragment() {
    let recipes = DelayedHandler::new(150, json!(1));
    let inventory = DelayedHandler::new(150, json!(2));
    let registry = ActionRegistry::builder()
        .register(QueryCategory::GenerateRecipes, recipes.clone())
        .register(QueryCategory::ManageInventory, inventory.clone())
        .build();
    let dispatcher = ActionDispatcher::new(Arc::new(registry));

    let started = Instant::now();
    let outcomes = dispatcher
        .dispatch(
            "owner-7",
            &[
                sub(QueryCategory::GenerateRecipes, "Plan dinner"),
                sub(QueryCategory::ManageInventory, "log my new groceries"),
            ],
        )
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(started.elapsed() < Duration::from_millis(290));

    let seen = recipes.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].owner, "owner-7");
    assert_eq!(seen[0].query, "Plan dinner");
    assert_eq!(inventory.seen()[0].query, "log my new groceries");
}

#[tokio::test]
async fn test_empty_batch_dispatches_nothing() {
    let dispatcher = ActionDispatcher::new(Arc::new(ActionRegistry::builder().build()));
    assert!(dispatcher.dispatch("owner-1", &[]).await.is_empty());
    assert!(dispatcher.registry().is_empty());
}

/// Handler that panics after yielding once
struct PanickingHandler;

#[async_trait]
impl ActionHandler for PanickingHandler {
    async fn handle(&self, request: &ActionRequest) -> AppResult<Value> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        panic!("receipt parser crashed on {}", request.query);
    }
}

#[tokio::test]
async fn test_panicking_handler_becomes_error_outcome() {
    let registry = ActionRegistry::builder()
        .register(QueryCategory::ProcessReceipt, Arc::new(PanickingHandler))
        .register(QueryCategory::GenerateRecipes, DelayedHandler::new(20, json!("plan")))
        .build();
    let dispatcher = ActionDispatcher::new(Arc::new(registry));

    let outcomes = dispatcher
        .dispatch(
            "owner-1",
            &[
                sub(QueryCategory::ProcessReceipt, "scan.jpg"),
                sub(QueryCategory::GenerateRecipes, "Plan dinner"),
            ],
        )
        .await;

    assert_eq!(
        outcomes,
        vec![
            HandlerOutcome::failure(
                QueryCategory::ProcessReceipt,
                "receipt parser crashed on scan.jpg"
            ),
            HandlerOutcome::success(QueryCategory::GenerateRecipes, json!("plan")),
        ]
    );
}
