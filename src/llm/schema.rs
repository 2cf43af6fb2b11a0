// ABOUTME: Named JSON schemas for structured output and a runtime validator for model replies
// ABOUTME: Covers the strict-mode subset: objects, arrays, strings, integers, numbers, booleans, enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Output Schemas
//!
//! The same [`OutputSchema`] is sent to the endpoint as the response format
//! and used locally to check the reply. A reply that fails [`OutputSchema::validate`]
//! is treated as "no result" by the structured client.

use std::fmt;

use serde_json::{Map, Value};

/// A named JSON schema describing the exact shape of an expected reply
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    name: String,
    schema: Value,
}

impl OutputSchema {
    /// Create a named schema
    #[must_use]
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// Schema name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw JSON schema
    #[must_use]
    pub const fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validate a value against this schema
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaViolation`] found, with a JSON-pointer-like path.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        validate_node(&self.schema, value, "$")
    }
}

/// Why a value does not conform to a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Location of the offending value (`$.recipes[0].servings`)
    pub path: String,
    /// What was wrong
    pub reason: String,
}

impl SchemaViolation {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

fn validate_node(schema: &Value, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            return Err(SchemaViolation::new(
                path,
                format!("value {value} is not one of {}", Value::Array(allowed.clone())),
            ));
        }
    }

    let Some(expected) = schema.get("type").and_then(Value::as_str) else {
        return Ok(());
    };

    match expected {
        "object" => validate_object(schema, value, path),
        "array" => validate_array(schema, value, path),
        "string" => expect(value.is_string(), path, expected, value),
        "integer" => expect(is_integer(value), path, expected, value),
        "number" => expect(value.is_number(), path, expected, value),
        "boolean" => expect(value.is_boolean(), path, expected, value),
        "null" => expect(value.is_null(), path, expected, value),
        other => Err(SchemaViolation::new(
            path,
            format!("unsupported schema type {other}"),
        )),
    }
}

fn validate_object(schema: &Value, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let Some(object) = value.as_object() else {
        return Err(type_mismatch(path, "object", value));
    };

    let empty = Map::new();
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if !object.contains_key(field) {
                return Err(SchemaViolation::new(
                    path,
                    format!("missing required field {field}"),
                ));
            }
        }
    }

    let closed = schema.get("additionalProperties") == Some(&Value::Bool(false));
    for (key, child) in object {
        match properties.get(key) {
            Some(child_schema) => validate_node(child_schema, child, &format!("{path}.{key}"))?,
            None if closed => {
                return Err(SchemaViolation::new(
                    path,
                    format!("unexpected field {key}"),
                ));
            }
            None => {}
        }
    }
    Ok(())
}

fn validate_array(schema: &Value, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let Some(items) = value.as_array() else {
        return Err(type_mismatch(path, "array", value));
    };
    if let Some(item_schema) = schema.get("items") {
        for (index, item) in items.iter().enumerate() {
            validate_node(item_schema, item, &format!("{path}[{index}]"))?;
        }
    }
    Ok(())
}

// Whole floats like `3.0` are rejected: typed deserialization into `i64` would fail on them.
fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn expect(ok: bool, path: &str, expected: &str, value: &Value) -> Result<(), SchemaViolation> {
    if ok {
        Ok(())
    } else {
        Err(type_mismatch(path, expected, value))
    }
}

fn type_mismatch(path: &str, expected: &str, value: &Value) -> SchemaViolation {
    let actual = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    SchemaViolation::new(path, format!("expected {expected}, found {actual}"))
}
