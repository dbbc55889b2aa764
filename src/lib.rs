// src/lib.rs

//! Potluck - minimal recipe sharing
//!
//! Lists recipes, renders a page per recipe, accepts new recipes from a
//! form post and exposes the same data as JSON.
//!
//! # Architecture
//!
//! - Flat-file storage: the whole collection is one pretty-printed JSON array
//! - Read fresh per request: no in-memory cache survives between calls
//! - Serialized writers: appends hold an in-process mutex and, optionally,
//!   a cross-process lock file
//! - Atomic replace: writes go to a temp file that is renamed into place

pub mod server;
pub mod store;

pub use server::{PotluckConfig, ServerConfig, ServerState, create_router, run_server};
pub use store::{
    IdGenerator, Recipe, RecipeCollection, RecipeStore, StoreError, StoreOptions, UuidGenerator,
};
