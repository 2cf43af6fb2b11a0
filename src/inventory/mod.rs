// ABOUTME: Owner-scoped inventory reads used by the meal planner
// ABOUTME: Store trait, concurrent snapshot fetch, SQLite and in-memory backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Inventory
//!
//! The meal planner never writes inventory. It reads the caller's
//! ingredients, cookware and appliances once per request through an
//! [`InventoryStore`] and works from the resulting [`InventorySnapshot`].
//!
//! Owner filtering uses "contains" semantics: a record matches when its
//! `owner` field contains the caller's identity subject.

mod memory;
mod sqlite;

pub use memory::InMemoryInventoryStore;
pub use sqlite::SqliteInventoryStore;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::{Appliance, Cookware, Ingredient, InventorySnapshot};

/// Read access to owner-scoped inventory records
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Ingredients whose owner contains `owner`
    async fn list_ingredients(&self, owner: &str) -> AppResult<Vec<Ingredient>>;

    /// Cookware whose owner contains `owner`
    async fn list_cookware(&self, owner: &str) -> AppResult<Vec<Cookware>>;

    /// Appliances whose owner contains `owner`
    async fn list_appliances(&self, owner: &str) -> AppResult<Vec<Appliance>>;
}

/// Fetch all three collections for one owner concurrently
///
/// # Errors
///
/// Returns an error if `owner` is blank or if any of the three reads fails.
pub async fn fetch_snapshot(store: &dyn InventoryStore, owner: &str) -> AppResult<InventorySnapshot> {
    if owner.trim().is_empty() {
        return Err(AppError::missing_field("owner is required to read inventory"));
    }

    let (ingredients, cookware, appliances) = tokio::try_join!(
        store.list_ingredients(owner),
        store.list_cookware(owner),
        store.list_appliances(owner),
    )?;

    debug!(
        owner,
        ingredients = ingredients.len(),
        cookware = cookware.len(),
        appliances = appliances.len(),
        "Fetched inventory snapshot"
    );

    Ok(InventorySnapshot {
        ingredients,
        cookware,
        appliances,
    })
}
