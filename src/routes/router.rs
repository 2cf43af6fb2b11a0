// ABOUTME: HTTP entry point of the query router
// ABOUTME: POST /api/router takes an invocation and always answers with a router envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use super::{invocation_body, ServerResources};
use crate::errors::AppError;
use crate::models::Invocation;
use crate::router::RouterResponse;

/// Query router routes
pub struct RouterRoutes;

impl RouterRoutes {
    /// Create all router routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/router", post(Self::route_query))
            .with_state(resources)
    }

    async fn route_query(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<Invocation>, JsonRejection>,
    ) -> Result<Json<RouterResponse>, AppError> {
        let invocation = invocation_body(body)?;
        info!("Routing user query");
        Ok(Json(resources.router.route(&invocation.arguments).await))
    }
}
