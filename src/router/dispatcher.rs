// ABOUTME: Concurrent fan-out of classified sub-queries to their registered handlers
// ABOUTME: Each branch captures its own failure; outcomes keep classification order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::future::join_all;
use futures_util::FutureExt;
use tracing::{debug, error, instrument, warn};

use super::aggregator::HandlerOutcome;
use super::registry::ActionRegistry;
use crate::models::{ActionRequest, ClassifiedSubQuery};

/// Invokes registered handlers for a batch of sub-queries
#[derive(Clone)]
pub struct ActionDispatcher {
    registry: Arc<ActionRegistry>,
}

impl ActionDispatcher {
    /// Create a dispatcher over an immutable registry
    #[must_use]
    pub const fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    /// Registry this dispatcher resolves handlers from
    #[must_use]
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Run every resolvable sub-query concurrently and wait for all of them
    ///
    /// Sub-queries whose category has no handler produce no outcome. A
    /// handler error or panic becomes an error outcome for that sub-query
    /// and never affects its siblings.
    #[instrument(skip_all, fields(owner = %owner, sub_queries = queries.len()))]
    pub async fn dispatch(&self, owner: &str, queries: &[ClassifiedSubQuery]) -> Vec<HandlerOutcome> {
        let branches = queries.iter().filter_map(|sub| {
            let Some(handler) = self.registry.get(sub.category) else {
                debug!(category = %sub.category, "No handler registered; dropping sub-query");
                return None;
            };
            let handler = Arc::clone(handler);
            let request = ActionRequest::new(sub.query.as_str(), owner);
            let category = sub.category;

            Some(async move {
                debug!(%category, "Routing sub-query");
                match AssertUnwindSafe(handler.handle(&request)).catch_unwind().await {
                    Ok(Ok(response)) => HandlerOutcome::success(category, response),
                    Ok(Err(e)) => {
                        warn!(%category, "Handler failed: {e}");
                        HandlerOutcome::failure(category, e.message)
                    }
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        error!(%category, "Handler panicked: {message}");
                        HandlerOutcome::failure(category, message)
                    }
                }
            })
        });

        join_all(branches).await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Handler panicked".to_owned())
}
