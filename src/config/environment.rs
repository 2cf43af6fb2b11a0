// ABOUTME: Environment-based configuration for the HTTP server, inventory database and LLM endpoint
// ABOUTME: Parses env vars with defaults, applies CLI overrides, validates and renders a redacted summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;

use serde::{Deserialize, Serialize};

use super::types::Environment;
use crate::constants::{env_vars, models, service_names};
use crate::errors::{AppError, AppResult};

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default inventory database
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/mealplan.db";

/// Model endpoint settings shared by the router and the meal planner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// Bearer token; optional for local endpoints
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model used to classify router queries
    pub router_model: String,
    /// Model used to generate meal plans
    pub recipes_model: String,
    /// Ask the endpoint to store completions
    pub store_completions: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: models::DEFAULT_LLM_BASE_URL.to_owned(),
            api_key: None,
            router_model: models::DEFAULT_ROUTER_MODEL.to_owned(),
            recipes_model: models::DEFAULT_RECIPES_MODEL.to_owned(),
            store_completions: true,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Inventory database URL
    pub database_url: String,
    /// Model endpoint settings
    pub llm: LlmConfig,
    /// Service name reported by the health endpoint
    pub server_name: String,
    /// Server version (from Cargo.toml)
    pub server_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            host: DEFAULT_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            llm: LlmConfig::default(),
            server_name: service_names::MEALPLAN_SERVER.to_owned(),
            server_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Values are only parsed here. Call [`Self::validate`] once every
    /// override has been applied.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a value cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                env_vars::ENVIRONMENT,
                "development",
            )),
            host: env_var_or(env_vars::HOST, DEFAULT_HOST),
            http_port: parse_env(env_vars::HTTP_PORT, defaults.http_port)?,
            database_url: env_var_or(env_vars::DATABASE_URL, DEFAULT_DATABASE_URL),
            llm: LlmConfig {
                base_url: env_var_or(env_vars::LLM_BASE_URL, models::DEFAULT_LLM_BASE_URL),
                api_key: env::var(env_vars::OPENAI_API_KEY)
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                router_model: env_var_or(env_vars::ROUTER_MODEL, models::DEFAULT_ROUTER_MODEL),
                recipes_model: env_var_or(env_vars::RECIPES_MODEL, models::DEFAULT_RECIPES_MODEL),
                store_completions: parse_env(env_vars::STORE_COMPLETIONS, defaults.llm.store_completions)?,
            },
            ..defaults
        };

        Ok(config)
    }

    /// Replace the port and database URL with command-line values when given
    #[must_use]
    pub fn with_overrides(mut self, http_port: Option<u16>, database_url: Option<String>) -> Self {
        if let Some(http_port) = http_port {
            self.http_port = http_port;
        }
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        self
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value
    pub fn validate(&self) -> AppResult<()> {
        if self.http_port == 0 {
            return Err(AppError::config(format!(
                "{} must be a non-zero port",
                env_vars::HTTP_PORT
            )));
        }
        if !self.database_url.starts_with("sqlite:") {
            return Err(AppError::config(format!(
                "{} must be a sqlite: URL, got {}",
                env_vars::DATABASE_URL,
                self.database_url
            )));
        }
        url::Url::parse(&self.llm.base_url).map_err(|e| {
            AppError::config(format!(
                "{} is not a valid URL ({}): {e}",
                env_vars::LLM_BASE_URL,
                self.llm.base_url
            ))
        })?;
        if self.environment.is_production() && self.llm.api_key.is_none() {
            return Err(AppError::config(format!(
                "{} is required in production",
                env_vars::OPENAI_API_KEY
            )));
        }
        Ok(())
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Human-readable configuration summary with secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Meal Plan Server Configuration:\n\
             - Environment: {}\n\
             - HTTP: {}\n\
             - Database: {}\n\
             - LLM Endpoint: {}\n\
             - API Key: {}\n\
             - Router Model: {}\n\
             - Recipes Model: {}\n\
             - Store Completions: {}\n\
             - Version: {}",
            self.environment,
            self.bind_address(),
            self.database_url,
            self.llm.base_url,
            if self.llm.api_key.is_some() {
                "Configured"
            } else {
                "Not set"
            },
            self.llm.router_model,
            self.llm.recipes_model,
            self.llm.store_completions,
            self.server_version,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, keeping `default` when unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        _ => Ok(default),
    }
}
