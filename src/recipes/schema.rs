// ABOUTME: JSON schema for the mealPlan structured output
// ABOUTME: Every recipe field is required; times, calories and servings are integers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{json, Value};

use crate::constants::schema_names;
use crate::llm::OutputSchema;

fn string_list() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn recipe_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": "string" },
            "ingredients": string_list(),
            "instructions": string_list(),
            "cookwareNeeded": string_list(),
            "appliancesNeeded": string_list(),
            "preparationTime": { "type": "integer" },
            "cookingTime": { "type": "integer" },
            "totalTime": { "type": "integer" },
            "caloriesPerServing": { "type": "integer" },
            "servings": { "type": "integer" }
        },
        "required": [
            "name",
            "description",
            "ingredients",
            "instructions",
            "cookwareNeeded",
            "appliancesNeeded",
            "preparationTime",
            "cookingTime",
            "totalTime",
            "caloriesPerServing",
            "servings"
        ],
        "additionalProperties": false
    })
}

/// Output schema of a generated meal plan
#[must_use]
pub fn meal_plan_schema() -> OutputSchema {
    OutputSchema::new(
        schema_names::MEAL_PLAN,
        json!({
            "type": "object",
            "properties": {
                "responseString": { "type": "string" },
                "recipes": { "type": "array", "items": recipe_schema() }
            },
            "required": ["responseString", "recipes"],
            "additionalProperties": false
        }),
    )
}
