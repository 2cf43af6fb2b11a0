// ABOUTME: SQLite-backed inventory store built on sqlx
// ABOUTME: Creates its tables on connect and answers owner-scoped list queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::info;

use super::InventoryStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Appliance, Cookware, Ingredient};

/// Inventory store persisted in SQLite
#[derive(Clone)]
pub struct SqliteInventoryStore {
    pool: SqlitePool,
}

impl SqliteInventoryStore {
    /// Connect to `database_url` and create the inventory tables
    ///
    /// File databases are created when missing. `sqlite::memory:` is held
    /// on a single connection so every query sees the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");
        let connection_options = if in_memory || database_url.contains('?') {
            database_url.to_owned()
        } else {
            format!("{database_url}?mode=rwc")
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

        let store = Self { pool };
        store.migrate().await?;
        info!(in_memory, "Inventory database ready");
        Ok(store)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create inventory tables and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT PRIMARY KEY,
                owner TEXT NOT NULL,
                name TEXT NOT NULL,
                quantity REAL NOT NULL,
                unit TEXT NOT NULL DEFAULT 'Count',
                type TEXT,
                storage TEXT,
                expiration_date TEXT NOT NULL,
                allergens TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cookware (
                id TEXT PRIMARY KEY,
                owner TEXT NOT NULL,
                name TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS appliances (
                id TEXT PRIMARY KEY,
                owner TEXT NOT NULL,
                name TEXT NOT NULL,
                available BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for (index, table) in [
            ("idx_ingredients_owner", "ingredients"),
            ("idx_cookware_owner", "cookware"),
            ("idx_appliances_owner", "appliances"),
        ] {
            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS {index} ON {table}(owner)"
            ))
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Insert an ingredient
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn add_ingredient(&self, ingredient: &Ingredient) -> AppResult<()> {
        let allergens = serde_json::to_string(&ingredient.allergens)?;
        sqlx::query(
            r"
            INSERT INTO ingredients (id, owner, name, quantity, unit, type, storage, expiration_date, allergens)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(&ingredient.id)
        .bind(&ingredient.owner)
        .bind(&ingredient.name)
        .bind(ingredient.quantity)
        .bind(&ingredient.unit)
        .bind(ingredient.kind.as_deref())
        .bind(ingredient.storage.as_deref())
        .bind(ingredient.expiration_date.format("%Y-%m-%d").to_string())
        .bind(allergens)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add ingredient: {e}")))?;
        Ok(())
    }

    /// Insert a piece of cookware
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn add_cookware(&self, cookware: &Cookware) -> AppResult<()> {
        sqlx::query("INSERT INTO cookware (id, owner, name, quantity) VALUES ($1, $2, $3, $4)")
            .bind(&cookware.id)
            .bind(&cookware.owner)
            .bind(&cookware.name)
            .bind(cookware.quantity)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to add cookware: {e}")))?;
        Ok(())
    }

    /// Insert an appliance
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn add_appliance(&self, appliance: &Appliance) -> AppResult<()> {
        sqlx::query("INSERT INTO appliances (id, owner, name, available) VALUES ($1, $2, $3, $4)")
            .bind(&appliance.id)
            .bind(&appliance.owner)
            .bind(&appliance.name)
            .bind(appliance.available)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to add appliance: {e}")))?;
        Ok(())
    }
}

fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    let expiration: String = row.try_get("expiration_date")?;
    let expiration_date = NaiveDate::parse_from_str(&expiration, "%Y-%m-%d").map_err(|e| {
        AppError::database(format!("Invalid expiration_date '{expiration}': {e}"))
    })?;
    let allergens: String = row.try_get("allergens")?;

    Ok(Ingredient {
        id: row.try_get("id")?,
        owner: row.try_get("owner")?,
        name: row.try_get("name")?,
        quantity: row.try_get("quantity")?,
        unit: row.try_get("unit")?,
        kind: row.try_get("type")?,
        storage: row.try_get("storage")?,
        expiration_date,
        allergens: serde_json::from_str(&allergens)?,
    })
}

fn row_to_cookware(row: &SqliteRow) -> AppResult<Cookware> {
    Ok(Cookware {
        id: row.try_get("id")?,
        owner: row.try_get("owner")?,
        name: row.try_get("name")?,
        quantity: row.try_get("quantity")?,
    })
}

fn row_to_appliance(row: &SqliteRow) -> AppResult<Appliance> {
    Ok(Appliance {
        id: row.try_get("id")?,
        owner: row.try_get("owner")?,
        name: row.try_get("name")?,
        available: row.try_get("available")?,
    })
}

#[async_trait]
impl InventoryStore for SqliteInventoryStore {
    async fn list_ingredients(&self, owner: &str) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query(
            r"
            SELECT id, owner, name, quantity, unit, type, storage, expiration_date, allergens
            FROM ingredients
            WHERE instr(owner, $1) > 0
            ORDER BY created_at ASC, rowid ASC
            ",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        rows.iter().map(row_to_ingredient).collect()
    }

    async fn list_cookware(&self, owner: &str) -> AppResult<Vec<Cookware>> {
        let rows = sqlx::query(
            r"
            SELECT id, owner, name, quantity
            FROM cookware
            WHERE instr(owner, $1) > 0
            ORDER BY created_at ASC, rowid ASC
            ",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list cookware: {e}")))?;

        rows.iter().map(row_to_cookware).collect()
    }

    async fn list_appliances(&self, owner: &str) -> AppResult<Vec<Appliance>> {
        let rows = sqlx::query(
            r"
            SELECT id, owner, name, available
            FROM appliances
            WHERE instr(owner, $1) > 0
            ORDER BY created_at ASC, rowid ASC
            ",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list appliances: {e}")))?;

        rows.iter().map(row_to_appliance).collect()
    }
}
