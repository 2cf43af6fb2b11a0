// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Reports status, service name and version without touching the model endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::ServerResources;

/// Health endpoint payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .with_state(resources)
    }

    async fn health(State(resources): State<Arc<ServerResources>>) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_owned(),
            service: resources.config.server_name.clone(),
            version: resources.config.server_version.clone(),
        })
    }
}
