// ABOUTME: Core types and constants for the meal planning router service
// ABOUTME: Foundation crate with error handling, domain models, and fixed response strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealplan Core
//!
//! Foundation crate shared by the meal planning service. It changes rarely,
//! which keeps incremental builds of the service crate cheap.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the HTTP error body
//! - **constants**: fixed response strings, model defaults, env var names
//! - **models**: query categories, recipes, inventory records, invocation contract

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
