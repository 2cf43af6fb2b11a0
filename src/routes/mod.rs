// ABOUTME: Route module organization for the meal planning HTTP endpoints
// ABOUTME: Holds the shared server resources and assembles the axum router with request tracing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the meal planning server
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the router and recipe generator.

/// Health check routes
pub mod health;
/// Recipe generation routes
pub mod recipes;
/// Query router routes
pub mod router;

pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;
pub use router::RouterRoutes;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::errors::AppError;
use crate::models::Invocation;
use crate::recipes::RecipeGenerator;
use crate::router::QueryRouter;

/// Long-lived components shared by every request
#[derive(Clone)]
pub struct ServerResources {
    /// Query router
    pub router: QueryRouter,
    /// Recipe generator
    pub generator: RecipeGenerator,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the router, generator and configuration
    #[must_use]
    pub const fn new(
        router: QueryRouter,
        generator: RecipeGenerator,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            router,
            generator,
            config,
        }
    }
}

/// Build the complete HTTP router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(RouterRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}

/// Unwrap an invocation body, turning malformed JSON into a 400 error
fn invocation_body(body: Result<Json<Invocation>, JsonRejection>) -> Result<Invocation, AppError> {
    body.map(|Json(invocation)| invocation)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}
