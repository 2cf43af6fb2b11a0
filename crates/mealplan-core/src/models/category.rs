// ABOUTME: Closed taxonomy of actions a free-text query can be routed to
// ABOUTME: Defines QueryCategory with its wire names and the ClassifiedSubQuery pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Category a sub-query is routed to
///
/// Exactly four values exist. The kebab-case wire names double as the
/// `functionName` of each handler outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryCategory {
    /// Requests for meal plans or recipes
    GenerateRecipes,
    /// Adding, updating, or removing ingredients, cookware, or appliances
    ManageInventory,
    /// Processing receipts and extracting purchased items
    ProcessReceipt,
    /// Updating dietary preferences and user settings
    EditPreferences,
}

impl QueryCategory {
    /// All categories in taxonomy order
    pub const ALL: [Self; 4] = [
        Self::GenerateRecipes,
        Self::ManageInventory,
        Self::ProcessReceipt,
        Self::EditPreferences,
    ];

    /// Wire name of the category
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateRecipes => "generate-recipes",
            Self::ManageInventory => "manage-inventory",
            Self::ProcessReceipt => "process-receipt",
            Self::EditPreferences => "edit-preferences",
        }
    }

    /// One-line description used when building the classification prompt
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::GenerateRecipes => "Requests for meal plans or recipes.",
            Self::ManageInventory => {
                "Adding, updating, or removing ingredients, cookware, or appliances."
            }
            Self::ProcessReceipt => "Processing receipts and extracting purchased items.",
            Self::EditPreferences => "Updating dietary preferences and user settings.",
        }
    }
}

impl Display for QueryCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown query category: {s}")))
    }
}

/// One classified fragment of a user query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSubQuery {
    /// Category the fragment belongs to
    pub category: QueryCategory,
    /// Natural-language fragment extracted from the original query
    pub query: String,
}

impl ClassifiedSubQuery {
    /// Create a classified sub-query
    #[must_use]
    pub fn new(category: QueryCategory, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }
}
