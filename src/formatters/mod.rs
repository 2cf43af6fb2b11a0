// ABOUTME: Tagged text rendering of inventory records for embedding in model prompts
// ABOUTME: Emits <root><item><field>value</field></item></root> with no whitespace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Context Formatter
//!
//! Inventory records are embedded into the meal planner prompt as compact
//! tagged blocks. Each record type decides which fields it exposes and in
//! which order through [`TaggedRecord`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mealplan_server::formatters::format_tagged;
//!
//! let block = format_tagged("cookware", "item", &snapshot.cookware);
//! // <cookware><item><name>Wok</name><quantity>1</quantity></item></cookware>
//! ```

use std::borrow::Cow;

use crate::models::{Appliance, Cookware, Ingredient, InventorySnapshot};

/// Separator used when a field holds a list of values
pub const LIST_SEPARATOR: &str = ", ";

/// A record that can be rendered as a sequence of tagged fields
pub trait TaggedRecord {
    /// Ordered `(tag, value)` pairs; absent optional fields are left out
    fn tagged_fields(&self) -> Vec<(&'static str, Cow<'_, str>)>;
}

impl TaggedRecord for Ingredient {
    fn tagged_fields(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        let mut fields = vec![
            ("name", Cow::Borrowed(self.name.as_str())),
            ("quantity", Cow::Owned(self.quantity.to_string())),
            ("unit", Cow::Borrowed(self.unit.as_str())),
        ];
        if let Some(kind) = &self.kind {
            fields.push(("type", Cow::Borrowed(kind.as_str())));
        }
        if let Some(storage) = &self.storage {
            fields.push(("storage", Cow::Borrowed(storage.as_str())));
        }
        fields.push((
            "expiration_date",
            Cow::Owned(self.expiration_date.format("%Y-%m-%d").to_string()),
        ));
        fields.push(("allergens", Cow::Owned(self.allergens.join(LIST_SEPARATOR))));
        fields
    }
}

impl TaggedRecord for Cookware {
    fn tagged_fields(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        vec![
            ("name", Cow::Borrowed(self.name.as_str())),
            ("quantity", Cow::Owned(self.quantity.to_string())),
        ]
    }
}

impl TaggedRecord for Appliance {
    fn tagged_fields(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        vec![
            ("name", Cow::Borrowed(self.name.as_str())),
            ("available", Cow::Owned(self.available.to_string())),
        ]
    }
}

/// Render records as a single tagged block
///
/// Values are escaped (`&`, `<`, `>`) so a field cannot break the block
/// structure. An empty slice yields `<root></root>`.
#[must_use]
pub fn format_tagged<R: TaggedRecord>(root_tag: &str, item_tag: &str, records: &[R]) -> String {
    let mut out = String::new();
    open(&mut out, root_tag);
    for record in records {
        open(&mut out, item_tag);
        for (tag, value) in record.tagged_fields() {
            open(&mut out, tag);
            out.push_str(&html_escape::encode_text(&value));
            close(&mut out, tag);
        }
        close(&mut out, item_tag);
    }
    close(&mut out, root_tag);
    out
}

fn open(out: &mut String, tag: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
}

fn close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// The three blocks embedded into the meal planner prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryBlocks {
    /// `<ingredients>` block
    pub ingredients: String,
    /// `<cookware>` block
    pub cookware: String,
    /// `<appliances>` block
    pub appliances: String,
}

impl InventoryBlocks {
    /// Render every collection of a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: &InventorySnapshot) -> Self {
        Self {
            ingredients: format_tagged("ingredients", "ingredient", &snapshot.ingredients),
            cookware: format_tagged("cookware", "item", &snapshot.cookware),
            appliances: format_tagged("appliances", "item", &snapshot.appliances),
        }
    }
}
