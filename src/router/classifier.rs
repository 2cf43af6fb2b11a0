// ABOUTME: Splits one free-text query into categorized sub-queries via a structured model call
// ABOUTME: An absent or unusable classification degrades to an empty list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::constants::schema_names;
use crate::errors::AppResult;
use crate::llm::prompts::router_system_prompt;
use crate::llm::{LlmProvider, OutputSchema, StructuredLlmClient};
use crate::models::{ClassifiedSubQuery, QueryCategory};

#[derive(Debug, Deserialize)]
struct QueryClassification {
    queries: Vec<ClassifiedSubQuery>,
}

/// Output schema of a query classification
#[must_use]
pub fn classification_schema() -> OutputSchema {
    let categories: Vec<&str> = QueryCategory::ALL.iter().map(QueryCategory::as_str).collect();
    OutputSchema::new(
        schema_names::QUERY_CLASSIFICATION,
        json!({
            "type": "object",
            "properties": {
                "queries": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "category": { "type": "string", "enum": categories },
                            "query": { "type": "string" }
                        },
                        "required": ["category", "query"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["queries"],
            "additionalProperties": false
        }),
    )
}

/// Classifies user queries against the fixed category taxonomy
#[derive(Clone)]
pub struct QueryClassifier {
    llm: StructuredLlmClient,
    schema: Arc<OutputSchema>,
    system_prompt: Arc<str>,
}

impl QueryClassifier {
    /// Create a classifier calling `model` on `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            llm: StructuredLlmClient::new(provider, model),
            schema: Arc::new(classification_schema()),
            system_prompt: router_system_prompt().into(),
        }
    }

    /// Classify `query` into ordered sub-queries
    ///
    /// Makes exactly one model call. Results are not deterministic across
    /// calls. Sub-queries whose fragment is blank are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error only when the model call itself fails. A reply that
    /// cannot be parsed yields `Ok(vec![])`.
    #[instrument(skip_all, fields(model = %self.llm.model()))]
    pub async fn classify(&self, query: &str) -> AppResult<Vec<ClassifiedSubQuery>> {
        let classification: Option<QueryClassification> = self
            .llm
            .complete(&self.system_prompt, query, &self.schema)
            .await?;

        let Some(classification) = classification else {
            warn!("No usable classification returned; treating query as having no actions");
            return Ok(Vec::new());
        };

        let total = classification.queries.len();
        let queries: Vec<ClassifiedSubQuery> = classification
            .queries
            .into_iter()
            .filter(|sub| !sub.query.trim().is_empty())
            .collect();
        if queries.len() < total {
            debug!(dropped = total - queries.len(), "Dropped sub-queries with empty fragments");
        }

        info!(
            categories = ?queries.iter().map(|q| q.category.as_str()).collect::<Vec<_>>(),
            "Classified query"
        );
        Ok(queries)
    }
}
