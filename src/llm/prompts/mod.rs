// ABOUTME: System prompts for the router and the meal planner loaded at compile time
// ABOUTME: Renders the category taxonomy and embeds tagged inventory blocks into templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts live in markdown files next to this module and are loaded with
//! `include_str!`. Placeholders use the `{{NAME}}` form.

use std::fmt::Write as _;

use crate::models::QueryCategory;

/// Router classification prompt template
pub const ROUTER_SYSTEM_PROMPT: &str = include_str!("router_system.md");

/// Meal planner prompt template
pub const MEAL_PLANNER_SYSTEM_PROMPT: &str = include_str!("meal_planner_system.md");

/// Placeholder text for sections that have no data source yet
pub const NOT_YET_AVAILABLE: &str = "None yet, will be added soon!";

/// Tagged inventory blocks embedded into the meal planner prompt
#[derive(Debug, Clone, Default)]
pub struct KitchenContext<'a> {
    /// `<ingredients>...</ingredients>`
    pub ingredients: &'a str,
    /// `<cookware>...</cookware>`
    pub cookware: &'a str,
    /// `<appliances>...</appliances>`
    pub appliances: &'a str,
}

/// Render the router prompt with one bullet per category
#[must_use]
pub fn router_system_prompt() -> String {
    let categories = QueryCategory::ALL
        .iter()
        .fold(String::new(), |mut out, category| {
            let _ = writeln!(out, "- \"{}\": {}", category.as_str(), category.description());
            out
        });
    ROUTER_SYSTEM_PROMPT.replace("{{CATEGORIES}}", categories.trim_end())
}

/// Render the meal planner prompt around the caller's kitchen data
#[must_use]
pub fn meal_planner_system_prompt(context: &KitchenContext<'_>) -> String {
    MEAL_PLANNER_SYSTEM_PROMPT
        .replace("{{INGREDIENTS}}", context.ingredients)
        .replace("{{COOKWARE}}", context.cookware)
        .replace("{{APPLIANCES}}", context.appliances)
        .replace("{{PREFERENCES}}", NOT_YET_AVAILABLE)
        .replace("{{PREVIOUS_RECIPES}}", NOT_YET_AVAILABLE)
}
