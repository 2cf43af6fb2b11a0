// ABOUTME: Handler outcomes and the unified router response envelope
// ABOUTME: Both shapes are untagged so the wire form carries no discriminator field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::responses;
use crate::models::QueryCategory;

/// Settled result of one dispatched sub-query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandlerOutcome {
    /// The handler failed; its error is recorded here only
    #[serde(rename_all = "camelCase")]
    Failure {
        /// Category of the sub-query
        function_name: QueryCategory,
        /// `Error handling request: <category>`
        response_string: String,
        /// Short error message
        error: String,
    },
    /// The handler returned a value (possibly `null`)
    #[serde(rename_all = "camelCase")]
    Success {
        /// Category of the sub-query
        function_name: QueryCategory,
        /// Handler payload
        response: Value,
    },
}

impl HandlerOutcome {
    /// Successful outcome
    #[must_use]
    pub const fn success(category: QueryCategory, response: Value) -> Self {
        Self::Success {
            function_name: category,
            response,
        }
    }

    /// Error outcome for a handler that failed
    #[must_use]
    pub fn failure(category: QueryCategory, error: impl Into<String>) -> Self {
        Self::Failure {
            function_name: category,
            response_string: format!("{} {category}", responses::HANDLER_ERROR_PREFIX),
            error: error.into(),
        }
    }

    /// Category this outcome belongs to
    #[must_use]
    pub const fn function_name(&self) -> QueryCategory {
        match self {
            Self::Failure { function_name, .. } | Self::Success { function_name, .. } => {
                *function_name
            }
        }
    }

    /// Whether the handler failed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// Terminal response returned to the router's caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouterResponse {
    /// At least one sub-query was classified and dispatched
    #[serde(rename_all = "camelCase")]
    Results {
        /// `Here is your response:`
        response_string: String,
        /// Outcomes in classification order
        results: Vec<HandlerOutcome>,
    },
    /// Validation failure, nothing classified, or an unexpected error
    #[serde(rename_all = "camelCase")]
    Failure {
        /// Human-readable summary
        response_string: String,
        /// Short error message
        error: String,
    },
}

impl RouterResponse {
    /// Envelope for dispatched outcomes
    #[must_use]
    pub fn results(results: Vec<HandlerOutcome>) -> Self {
        Self::Results {
            response_string: responses::ROUTER_SUCCESS.to_owned(),
            results,
        }
    }

    /// Envelope for a query that produced no sub-queries
    #[must_use]
    pub fn no_actions() -> Self {
        Self::Failure {
            response_string: responses::ROUTER_NO_ACTIONS.to_owned(),
            error: responses::ROUTER_NO_QUERIES_ERROR.to_owned(),
        }
    }

    /// Envelope for validation failures and errors caught at the outer boundary
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            response_string: responses::ROUTER_FAILURE.to_owned(),
            error: error.into(),
        }
    }

    /// Human-readable summary
    #[must_use]
    pub fn response_string(&self) -> &str {
        match self {
            Self::Results {
                response_string, ..
            }
            | Self::Failure {
                response_string, ..
            } => response_string.as_str(),
        }
    }

    /// Outcomes, or an empty slice for failure envelopes
    #[must_use]
    pub fn outcomes(&self) -> &[HandlerOutcome] {
        match self {
            Self::Results { results, .. } => results,
            Self::Failure { .. } => &[],
        }
    }

    /// Top-level error, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Results { .. } => None,
            Self::Failure { error, .. } => Some(error.as_str()),
        }
    }
}
