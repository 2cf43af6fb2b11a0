// ABOUTME: Application constants for the meal planning router
// ABOUTME: Fixed response strings, model defaults, schema names and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants shared between the router, recipe generator and HTTP layer.
//!
//! The response strings are part of the client contract: the mobile app
//! renders them verbatim, so they must not drift.

/// User-facing response strings returned inside envelopes
pub mod responses {
    /// Top-level success banner for routed requests
    pub const ROUTER_SUCCESS: &str = "Here is your response:";

    /// Returned when classification produced zero actionable sub-queries
    pub const ROUTER_NO_ACTIONS: &str =
        "I couldn't determine any valid actions from your request.";

    /// Error field paired with [`ROUTER_NO_ACTIONS`]
    pub const ROUTER_NO_QUERIES_ERROR: &str = "No valid queries detected";

    /// Returned when anything escapes the per-handler guard
    pub const ROUTER_FAILURE: &str = "An error occurred while processing your request.";

    /// Prefix of the error-shaped handler outcome
    pub const HANDLER_ERROR_PREFIX: &str = "Error handling request:";

    /// Safe default when the meal planner produced nothing parseable
    pub const RECIPES_NO_VALID_RESPONSE: &str = "Error: No valid response generated.";

    /// Returned when recipe generation failed at the function boundary
    pub const RECIPES_FAILURE: &str = "An error occurred while generating your meal plan.";

    /// Validation message for the invocation contract
    pub const MISSING_PARAMETERS: &str = "Missing required parameters: query and owner.";
}

/// Language model defaults per call site
pub mod models {
    /// Model used for query classification
    pub const DEFAULT_ROUTER_MODEL: &str = "gpt-4o-2024-08-06";

    /// Model used for meal plan generation
    pub const DEFAULT_RECIPES_MODEL: &str = "gpt-4o-mini";

    /// Default `OpenAI`-compatible endpoint
    pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
}

/// Names of the structured output schemas sent to the model
pub mod schema_names {
    /// Classification schema (`{ queries: [...] }`)
    pub const QUERY_CLASSIFICATION: &str = "query_classification";

    /// Meal plan schema (`{ responseString, recipes }`)
    pub const MEAL_PLAN: &str = "mealPlan";
}

/// Service identity used in logs and the health endpoint
pub mod service_names {
    /// Binary and tracing target name
    pub const MEALPLAN_SERVER: &str = "mealplan-server";
}

/// Environment variable names read by the configuration layer
pub mod env_vars {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HTTP bind host
    pub const HOST: &str = "HOST";
    /// SQLite connection string for the inventory store
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// API key for the language model endpoint
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Base URL of the `OpenAI`-compatible endpoint
    pub const LLM_BASE_URL: &str = "MEALPLAN_LLM_BASE_URL";
    /// Model override for classification
    pub const ROUTER_MODEL: &str = "MEALPLAN_ROUTER_MODEL";
    /// Model override for meal planning
    pub const RECIPES_MODEL: &str = "MEALPLAN_RECIPES_MODEL";
    /// Whether the meal planner asks the endpoint to store completions
    pub const STORE_COMPLETIONS: &str = "MEALPLAN_LLM_STORE_COMPLETIONS";
}
