// ABOUTME: Inbound invocation contract shared by the router and the meal planner
// ABOUTME: Wraps { arguments: { query, owner } } and validates it once up front
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::responses;
use crate::errors::{AppError, AppResult};

/// Raw arguments as received from the caller
///
/// Both fields are optional on the wire so a missing value reaches the
/// validation step instead of failing body extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionArguments {
    /// Free-text user query
    #[serde(default)]
    pub query: Option<String>,
    /// Identity subject of the caller
    #[serde(default)]
    pub owner: Option<String>,
}

impl ActionArguments {
    /// Build arguments from a query and owner
    #[must_use]
    pub fn new(query: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            owner: Some(owner.into()),
        }
    }

    /// Validate that both query and owner are present and non-blank
    ///
    /// # Errors
    ///
    /// Returns `AppError` with `MissingRequiredField` when either is absent.
    pub fn validate(&self) -> AppResult<ActionRequest> {
        let query = non_blank(self.query.as_deref());
        let owner = non_blank(self.owner.as_deref());

        match (query, owner) {
            (Some(query), Some(owner)) => Ok(ActionRequest {
                query: query.to_owned(),
                owner: owner.to_owned(),
            }),
            _ => Err(AppError::missing_field(responses::MISSING_PARAMETERS)),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Invocation envelope: `{ "arguments": { "query": ..., "owner": ... } }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Invocation arguments
    #[serde(default)]
    pub arguments: ActionArguments,
}

impl Invocation {
    /// Build an invocation from a query and owner
    #[must_use]
    pub fn new(query: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            arguments: ActionArguments::new(query, owner),
        }
    }
}

/// Validated request handed to handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Non-empty query text
    pub query: String,
    /// Non-empty owner identifier
    pub owner: String,
}

impl ActionRequest {
    /// Build a validated request directly
    #[must_use]
    pub fn new(query: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            owner: owner.into(),
        }
    }
}

impl From<ActionRequest> for ActionArguments {
    fn from(request: ActionRequest) -> Self {
        Self {
            query: Some(request.query),
            owner: Some(request.owner),
        }
    }
}
