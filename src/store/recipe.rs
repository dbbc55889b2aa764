// src/store/recipe.rs

//! Recipe record types.
//!
//! A recipe is a flat mapping of field names to string values. The only
//! field with meaning to the store is `id`; everything else (title,
//! ingredients, steps, ...) is free-form and unvalidated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the identifier field in persisted and submitted records
pub const ID_FIELD: &str = "id";

/// A single user-submitted recipe
///
/// Serializes as a flat JSON object with `id` first, followed by the
/// remaining fields in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Opaque identifier, unique within the collection
    pub id: String,
    /// Every other field of the record, never containing `id`
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
}

impl Recipe {
    /// Build a recipe from submitted fields and a store-assigned id.
    ///
    /// Any `id` present in `fields` is discarded.
    pub fn new(id: impl Into<String>, mut fields: BTreeMap<String, String>) -> Self {
        fields.remove(ID_FIELD);
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Look up a field by name, including `id`
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == ID_FIELD {
            Some(&self.id)
        } else {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// Fields other than `id`, in key order
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Consume the recipe, returning its fields without `id`
    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }

    /// Title used when listing recipes, falling back to the id
    pub fn title(&self) -> &str {
        self.fields
            .get("title")
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.id)
    }
}

/// The full ordered sequence of recipes as persisted
pub type RecipeCollection = Vec<Recipe>;
