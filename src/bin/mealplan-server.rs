// ABOUTME: Server binary for the meal planning API
// ABOUTME: Wires configuration, logging, the inventory database and the model endpoint into axum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Meal Plan Server Binary
//!
//! Starts the HTTP server exposing the query router and the recipe generator.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Days, Utc};
use clap::Parser;
use mealplan_server::{
    config::ServerConfig,
    inventory::{InventoryStore, SqliteInventoryStore},
    llm::{LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider},
    logging,
    models::{Appliance, Cookware, Ingredient},
    recipes::RecipeGenerator,
    router::{ActionRegistry, QueryClassifier, QueryRouter},
    routes::{build_router, ServerResources},
};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "mealplan-server")]
#[command(about = "Meal planning API - LLM query routing and inventory-aware recipe generation")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override inventory database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Seed a small demo kitchen for this owner if it has no inventory yet
    #[arg(long)]
    seed_owner: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ServerConfig::from_env()?.with_overrides(args.http_port, args.database_url);
    config.validate()?;

    logging::init_from_env()?;
    info!("Starting meal plan server");
    info!("{}", config.summary());

    let store = SqliteInventoryStore::connect(&config.database_url).await?;
    if let Some(owner) = args.seed_owner.as_deref() {
        seed_demo_inventory(&store, owner).await?;
    }

    let provider: Arc<dyn LlmProvider> = Arc::new(OpenAiCompatibleProvider::new(
        OpenAiCompatibleConfig {
            base_url: config.llm.base_url.clone(),
            api_key: config.llm.api_key.clone(),
            ..OpenAiCompatibleConfig::default()
        },
    )?);
    if config.llm.api_key.is_none() {
        warn!("No API key configured; model calls will be sent unauthenticated");
    }

    let generator = RecipeGenerator::new(
        Arc::new(store),
        Arc::clone(&provider),
        config.llm.recipes_model.clone(),
    )
    .with_stored_completions(config.llm.store_completions);
    let registry = Arc::new(ActionRegistry::standard(generator.clone()));
    let classifier = QueryClassifier::new(provider, config.llm.router_model.clone());
    let router = QueryRouter::new(classifier, registry);

    let bind_address = config.bind_address();
    let resources = Arc::new(ServerResources::new(router, generator, Arc::new(config)));
    let app = build_router(resources);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!("Listening on http://{bind_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Meal plan server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received");
}

async fn seed_demo_inventory(store: &SqliteInventoryStore, owner: &str) -> Result<()> {
    if !store.list_ingredients(owner).await?.is_empty() {
        info!(owner, "Owner already has inventory; skipping demo seed");
        return Ok(());
    }

    let next_week = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .context("Date out of range")?;
    let ingredient = |name: &str, quantity: f64, unit: &str, kind: &str, allergens: &[&str]| {
        Ingredient {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_owned(),
            name: name.to_owned(),
            quantity,
            unit: unit.to_owned(),
            kind: Some(kind.to_owned()),
            storage: Some("fridge".to_owned()),
            expiration_date: next_week,
            allergens: allergens.iter().map(|a| (*a).to_owned()).collect(),
        }
    };

    for item in [
        ingredient("Chicken breast", 500.0, "g", "protein", &[]),
        ingredient("Eggs", 6.0, "Count", "protein", &["egg"]),
        ingredient("Spinach", 200.0, "g", "vegetable", &[]),
        ingredient("Cheddar", 150.0, "g", "dairy", &["milk"]),
    ] {
        store.add_ingredient(&item).await?;
    }
    for (name, quantity) in [("Frying pan", 1), ("Saucepan", 2), ("Chef's knife", 1)] {
        store
            .add_cookware(&Cookware {
                id: Uuid::new_v4().to_string(),
                owner: owner.to_owned(),
                name: name.to_owned(),
                quantity,
            })
            .await?;
    }
    for (name, available) in [("Oven", true), ("Stove", true), ("Blender", false)] {
        store
            .add_appliance(&Appliance {
                id: Uuid::new_v4().to_string(),
                owner: owner.to_owned(),
                name: name.to_owned(),
                available,
            })
            .await?;
    }

    info!(owner, "Seeded demo inventory");
    Ok(())
}
