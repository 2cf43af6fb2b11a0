// ABOUTME: Inventory-aware meal plan generation through a structured model call
// ABOUTME: Reads the caller's kitchen, embeds it in the prompt and validates the returned recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Generator
//!
//! One generation is three steps: fetch the owner's inventory snapshot,
//! render it into tagged blocks inside the meal planner prompt, then ask the
//! model for a [`MealPlanResponse`] under the `mealPlan` schema.
//!
//! [`RecipeGenerator::generate`] never returns an error. Failures become the
//! meal plan failure envelope and an unusable model reply becomes
//! [`MealPlanResponse::no_valid_response`].

mod schema;

pub use schema::meal_plan_schema;

use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::errors::AppResult;
use crate::formatters::InventoryBlocks;
use crate::inventory::{fetch_snapshot, InventoryStore};
use crate::llm::prompts::{meal_planner_system_prompt, KitchenContext};
use crate::llm::{LlmProvider, OutputSchema, StructuredLlmClient};
use crate::models::{ActionArguments, ActionRequest, MealPlanResponse, Recipe};

/// Shape the model must return; `error` is never produced by the model
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedMealPlan {
    response_string: String,
    recipes: Vec<Recipe>,
}

impl From<GeneratedMealPlan> for MealPlanResponse {
    fn from(plan: GeneratedMealPlan) -> Self {
        Self {
            response_string: plan.response_string,
            recipes: plan.recipes,
            error: None,
        }
    }
}

/// Generates meal plans from a user's query and kitchen inventory
#[derive(Clone)]
pub struct RecipeGenerator {
    store: Arc<dyn InventoryStore>,
    llm: StructuredLlmClient,
    schema: Arc<OutputSchema>,
}

impl RecipeGenerator {
    /// Create a generator reading from `store` and calling `model` on `provider`
    #[must_use]
    pub fn new(
        store: Arc<dyn InventoryStore>,
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            llm: StructuredLlmClient::new(provider, model),
            schema: Arc::new(meal_plan_schema()),
        }
    }

    /// Ask the endpoint to store generated completions
    #[must_use]
    pub fn with_stored_completions(mut self, store: bool) -> Self {
        self.llm = self.llm.with_store(store);
        self
    }

    /// Model used for generation
    #[must_use]
    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Generate a meal plan for raw invocation arguments
    ///
    /// Missing `query` or `owner` yields the failure envelope without touching
    /// the inventory store or the model.
    pub async fn generate(&self, arguments: &ActionArguments) -> MealPlanResponse {
        match arguments.validate() {
            Ok(request) => self.generate_for(&request).await,
            Err(e) => {
                error!("Meal plan request rejected: {}", e.message);
                MealPlanResponse::failure(e.message)
            }
        }
    }

    /// Generate a meal plan for an already validated request
    #[instrument(skip_all, fields(owner = %request.owner, model = %self.llm.model()))]
    pub async fn generate_for(&self, request: &ActionRequest) -> MealPlanResponse {
        match self.try_generate(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Meal plan generation failed: {e}");
                MealPlanResponse::failure(e.message)
            }
        }
    }

    async fn try_generate(&self, request: &ActionRequest) -> AppResult<MealPlanResponse> {
        let snapshot = fetch_snapshot(self.store.as_ref(), &request.owner).await?;
        let blocks = InventoryBlocks::from_snapshot(&snapshot);
        let system = meal_planner_system_prompt(&KitchenContext {
            ingredients: &blocks.ingredients,
            cookware: &blocks.cookware,
            appliances: &blocks.appliances,
        });

        let plan: Option<GeneratedMealPlan> = self
            .llm
            .complete(&system, &request.query, &self.schema)
            .await?;

        Ok(plan.map_or_else(MealPlanResponse::no_valid_response, |plan| {
            info!(recipes = plan.recipes.len(), "Generated meal plan");
            plan.into()
        }))
    }
}
