// ABOUTME: HTTP entry point of the recipe generator
// ABOUTME: POST /api/recipes/generate returns a meal plan envelope for the caller's inventory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use super::{invocation_body, ServerResources};
use crate::errors::AppError;
use crate::models::{Invocation, MealPlanResponse};

/// Recipe generation routes
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/generate", post(Self::generate))
            .with_state(resources)
    }

    async fn generate(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<Invocation>, JsonRejection>,
    ) -> Result<Json<MealPlanResponse>, AppError> {
        let invocation = invocation_body(body)?;
        Ok(Json(resources.generator.generate(&invocation.arguments).await))
    }
}
