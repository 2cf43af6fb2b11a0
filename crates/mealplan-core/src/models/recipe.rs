// ABOUTME: Recipe and meal plan envelope produced by the meal planner
// ABOUTME: Wire shapes use camelCase to match the mobile client schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::responses;

/// A fully specified recipe
///
/// Every field is required. Values are built fresh from validated model
/// output and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe title
    pub name: String,
    /// Short description
    pub description: String,
    /// Ingredient lines, quantity and unit included when known
    pub ingredients: Vec<String>,
    /// Ordered preparation steps
    pub instructions: Vec<String>,
    /// Cookware the recipe relies on
    pub cookware_needed: Vec<String>,
    /// Appliances the recipe relies on
    pub appliances_needed: Vec<String>,
    /// Preparation time in minutes
    pub preparation_time: i64,
    /// Cooking time in minutes
    pub cooking_time: i64,
    /// Total time in minutes
    pub total_time: i64,
    /// Calories per serving
    pub calories_per_serving: i64,
    /// Number of servings
    pub servings: i64,
}

/// Envelope returned by the meal planner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    /// Natural-language preface shown above the recipes
    pub response_string: String,
    /// Generated recipes, possibly empty
    pub recipes: Vec<Recipe>,
    /// Short failure description when generation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MealPlanResponse {
    /// Safe default when the model produced no parseable plan
    #[must_use]
    pub fn no_valid_response() -> Self {
        Self {
            response_string: responses::RECIPES_NO_VALID_RESPONSE.to_owned(),
            recipes: Vec::new(),
            error: None,
        }
    }

    /// Error envelope for failures caught at the generator boundary
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            response_string: responses::RECIPES_FAILURE.to_owned(),
            recipes: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Whether this envelope represents a failure
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
