// ABOUTME: Query routing pipeline: classify, dispatch concurrently, aggregate one envelope
// ABOUTME: QueryRouter is the outer boundary and always returns a well-shaped response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Query Router
//!
//! One user utterance may ask for several things at once ("plan dinner and
//! log my groceries"). The router:
//!
//! 1. validates the invocation (no network call happens on failure),
//! 2. asks the [`QueryClassifier`] for ordered `(category, sub-query)` pairs,
//! 3. fans out to registered handlers through the [`ActionDispatcher`],
//! 4. folds the outcomes into a [`RouterResponse`].
//!
//! Handler failures stay inside their own [`HandlerOutcome`]. Anything else
//! that goes wrong is converted into the generic failure envelope.

mod aggregator;
mod classifier;
mod dispatcher;
mod registry;

pub use aggregator::{HandlerOutcome, RouterResponse};
pub use classifier::{classification_schema, QueryClassifier};
pub use dispatcher::ActionDispatcher;
pub use registry::{
    ActionHandler, ActionRegistry, ActionRegistryBuilder, NoopHandler, RecipeActionHandler,
};

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::errors::AppResult;
use crate::models::{ActionArguments, ActionRequest};

/// Classifies, dispatches and aggregates router invocations
#[derive(Clone)]
pub struct QueryRouter {
    classifier: QueryClassifier,
    dispatcher: ActionDispatcher,
}

impl QueryRouter {
    /// Create a router from a classifier and a handler registry
    #[must_use]
    pub fn new(classifier: QueryClassifier, registry: Arc<ActionRegistry>) -> Self {
        Self {
            classifier,
            dispatcher: ActionDispatcher::new(registry),
        }
    }

    /// Route one invocation
    ///
    /// Never returns an error: every failure is expressed in the envelope.
    pub async fn route(&self, arguments: &ActionArguments) -> RouterResponse {
        let request = match arguments.validate() {
            Ok(request) => request,
            Err(e) => {
                warn!("Router request rejected: {}", e.message);
                return RouterResponse::failure(e.message);
            }
        };

        match self.try_route(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Router failed: {e}");
                RouterResponse::failure(e.message)
            }
        }
    }

    #[instrument(skip_all, fields(owner = %request.owner))]
    async fn try_route(&self, request: &ActionRequest) -> AppResult<RouterResponse> {
        let queries = self.classifier.classify(&request.query).await?;
        if queries.is_empty() {
            info!("No actions detected");
            return Ok(RouterResponse::no_actions());
        }

        let outcomes = self.dispatcher.dispatch(&request.owner, &queries).await;
        info!(
            outcomes = outcomes.len(),
            failed = outcomes.iter().filter(|o| o.is_error()).count(),
            "Router request complete"
        );
        Ok(RouterResponse::results(outcomes))
    }
}
