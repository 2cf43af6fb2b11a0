// ABOUTME: Owner-scoped inventory records read from the data service
// ABOUTME: Ingredient, Cookware, Appliance and the combined InventorySnapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default unit for ingredients stored without one
pub const DEFAULT_INGREDIENT_UNIT: &str = "Count";

fn default_unit() -> String {
    DEFAULT_INGREDIENT_UNIT.to_owned()
}

const fn default_available() -> bool {
    true
}

/// An ingredient on hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Record identifier
    pub id: String,
    /// Identity subject of the owner
    pub owner: String,
    /// Ingredient name
    pub name: String,
    /// Quantity in `unit`
    pub quantity: f64,
    /// Measurement unit
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Free-form category (protein, vegetable, ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Storage location (fridge, pantry, ...)
    #[serde(default)]
    pub storage: Option<String>,
    /// Expiration date
    pub expiration_date: NaiveDate,
    /// Allergens contained in the ingredient
    #[serde(default)]
    pub allergens: Vec<String>,
}

/// A piece of cookware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookware {
    /// Record identifier
    pub id: String,
    /// Identity subject of the owner
    pub owner: String,
    /// Cookware name
    pub name: String,
    /// How many the owner has
    pub quantity: i64,
}

/// A kitchen appliance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appliance {
    /// Record identifier
    pub id: String,
    /// Identity subject of the owner
    pub owner: String,
    /// Appliance name
    pub name: String,
    /// Whether the appliance is currently usable
    #[serde(default = "default_available")]
    pub available: bool,
}

/// Everything the meal planner knows about one owner's kitchen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Ingredients on hand
    pub ingredients: Vec<Ingredient>,
    /// Cookware available
    pub cookware: Vec<Cookware>,
    /// Appliances available
    pub appliances: Vec<Appliance>,
}

impl InventorySnapshot {
    /// Total number of records across all three collections
    #[must_use]
    pub fn len(&self) -> usize {
        self.ingredients.len() + self.cookware.len() + self.appliances.len()
    }

    /// Whether the owner has no inventory at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
