// ABOUTME: In-memory inventory store for tests and local demos
// ABOUTME: Applies the same owner "contains" filter as the persistent backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InventoryStore;
use crate::errors::AppResult;
use crate::models::{Appliance, Cookware, Ingredient, InventorySnapshot};

/// Inventory held in process memory
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inventory: RwLock<InventorySnapshot>,
}

impl InMemoryInventoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    #[must_use]
    pub fn with_snapshot(snapshot: InventorySnapshot) -> Self {
        Self {
            inventory: RwLock::new(snapshot),
        }
    }

    /// Add an ingredient
    pub async fn add_ingredient(&self, ingredient: Ingredient) {
        self.inventory.write().await.ingredients.push(ingredient);
    }

    /// Add a piece of cookware
    pub async fn add_cookware(&self, cookware: Cookware) {
        self.inventory.write().await.cookware.push(cookware);
    }

    /// Add an appliance
    pub async fn add_appliance(&self, appliance: Appliance) {
        self.inventory.write().await.appliances.push(appliance);
    }
}

fn owned_by<'a, T: Clone + 'a>(
    records: impl IntoIterator<Item = &'a T>,
    owner_of: impl Fn(&T) -> &str,
    owner: &str,
) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| owner_of(*record).contains(owner))
        .cloned()
        .collect()
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn list_ingredients(&self, owner: &str) -> AppResult<Vec<Ingredient>> {
        let inventory = self.inventory.read().await;
        Ok(owned_by(&inventory.ingredients, |i| i.owner.as_str(), owner))
    }

    async fn list_cookware(&self, owner: &str) -> AppResult<Vec<Cookware>> {
        let inventory = self.inventory.read().await;
        Ok(owned_by(&inventory.cookware, |c| c.owner.as_str(), owner))
    }

    async fn list_appliances(&self, owner: &str) -> AppResult<Vec<Appliance>> {
        let inventory = self.inventory.read().await;
        Ok(owned_by(&inventory.appliances, |a| a.owner.as_str(), owner))
    }
}
