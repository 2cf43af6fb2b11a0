// ABOUTME: Domain models for query routing, meal planning and inventory
// ABOUTME: Re-exports category, recipe, inventory and invocation types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod category;
mod inventory;
mod invocation;
mod recipe;

pub use category::{ClassifiedSubQuery, QueryCategory};
pub use inventory::{Appliance, Cookware, Ingredient, InventorySnapshot, DEFAULT_INGREDIENT_UNIT};
pub use invocation::{ActionArguments, ActionRequest, Invocation};
pub use recipe::{MealPlanResponse, Recipe};
