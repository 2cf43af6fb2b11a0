// ABOUTME: Configuration management module for server, database and model endpoint settings
// ABOUTME: Loads everything from environment variables with CLI overrides applied by the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the meal planning server
//!
//! - **Environment**: Server, database and LLM settings from environment variables
//! - **Types**: Lenient enums shared by the other configuration types

/// Environment and server configuration
pub mod environment;
/// Shared configuration enums
pub mod types;

pub use environment::{LlmConfig, ServerConfig};
pub use types::Environment;
