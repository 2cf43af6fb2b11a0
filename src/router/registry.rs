// ABOUTME: Handler contract and the immutable category-to-handler registry
// ABOUTME: Provides the no-op placeholder handler and the recipe generation handler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppResult;
use crate::models::{ActionRequest, QueryCategory};
use crate::recipes::RecipeGenerator;

/// A downstream action a classified sub-query is routed to
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Handle one sub-query on behalf of `request.owner`
    ///
    /// # Errors
    ///
    /// Any error is captured by the dispatcher as an error outcome for this
    /// sub-query only.
    async fn handle(&self, request: &ActionRequest) -> AppResult<Value>;
}

/// Placeholder for categories that have no implementation yet
///
/// Registered explicitly so its category still appears in router results,
/// with a `null` response.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

#[async_trait]
impl ActionHandler for NoopHandler {
    async fn handle(&self, _request: &ActionRequest) -> AppResult<Value> {
        Ok(Value::Null)
    }
}

/// Routes `generate-recipes` sub-queries into the recipe generator
#[derive(Clone)]
pub struct RecipeActionHandler {
    generator: RecipeGenerator,
}

impl RecipeActionHandler {
    /// Wrap a recipe generator
    #[must_use]
    pub const fn new(generator: RecipeGenerator) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ActionHandler for RecipeActionHandler {
    async fn handle(&self, request: &ActionRequest) -> AppResult<Value> {
        let plan = self.generator.generate_for(request).await;
        Ok(serde_json::to_value(plan)?)
    }
}

/// Immutable mapping from category to handler
///
/// Built once at startup and shared by every dispatch.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    handlers: HashMap<QueryCategory, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// Start building a registry
    #[must_use]
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::default()
    }

    /// Registry covering all four categories
    ///
    /// `generate-recipes` runs the recipe generator; the other three are
    /// explicit no-op entries.
    #[must_use]
    pub fn standard(generator: RecipeGenerator) -> Self {
        Self::builder()
            .register(
                QueryCategory::GenerateRecipes,
                Arc::new(RecipeActionHandler::new(generator)),
            )
            .register(QueryCategory::ManageInventory, Arc::new(NoopHandler))
            .register(QueryCategory::ProcessReceipt, Arc::new(NoopHandler))
            .register(QueryCategory::EditPreferences, Arc::new(NoopHandler))
            .build()
    }

    /// Handler registered for `category`
    #[must_use]
    pub fn get(&self, category: QueryCategory) -> Option<&Arc<dyn ActionHandler>> {
        self.handlers.get(&category)
    }

    /// Whether no category is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Builder for [`ActionRegistry`]
#[derive(Default)]
pub struct ActionRegistryBuilder {
    handlers: HashMap<QueryCategory, Arc<dyn ActionHandler>>,
}

impl ActionRegistryBuilder {
    /// Register `handler` for `category`, replacing any previous entry
    #[must_use]
    pub fn register(mut self, category: QueryCategory, handler: Arc<dyn ActionHandler>) -> Self {
        self.handlers.insert(category, handler);
        self
    }

    /// Freeze the registry
    #[must_use]
    pub fn build(self) -> ActionRegistry {
        ActionRegistry {
            handlers: self.handlers,
        }
    }
}
