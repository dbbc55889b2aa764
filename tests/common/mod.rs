// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use potluck::RecipeStore;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// Create a store whose file holds `contents`.
///
/// Returns (TempDir, store) - keep the TempDir alive to prevent cleanup.
pub fn store_with(contents: &str) -> (TempDir, RecipeStore) {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("recipes.json");
    std::fs::write(&path, contents).unwrap();
    (temp_dir, RecipeStore::open(path))
}

/// Build a field map from string pairs
pub fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
