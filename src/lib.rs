// ABOUTME: Main library entry point for the meal planning API
// ABOUTME: Query routing over a structured LLM client plus inventory-aware recipe generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Meal Plan Server
//!
//! Two entry points sit behind one HTTP server:
//!
//! - **Query router**: classifies a free-text request into zero or more
//!   categorized sub-queries, dispatches them concurrently to registered
//!   handlers and merges the outcomes into one envelope.
//! - **Recipe generator**: reads the caller's ingredients, cookware and
//!   appliances, embeds them in a prompt and returns schema-validated recipes.
//!
//! ## Architecture
//!
//! - **LLM**: Provider trait, OpenAI-compatible client, structured output validation
//! - **Inventory**: Owner-scoped reads from SQLite or memory
//! - **Formatters**: Tagged text blocks embedded into prompts
//! - **Recipes**: Meal plan generation
//! - **Router**: Classifier, dispatcher and response aggregation
//! - **Routes**: axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealplan_server::config::ServerConfig;
//! use mealplan_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Meal plan server configured on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Tagged text rendering of inventory for prompts
pub mod formatters;

/// Owner-scoped inventory stores
pub mod inventory;

/// LLM provider abstraction and structured output
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Meal plan generation
pub mod recipes;

/// Query classification, dispatch and aggregation
pub mod router;

/// HTTP routes
pub mod routes;

pub use mealplan_core::{constants, errors, models};
