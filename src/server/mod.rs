// src/server/mod.rs
//! Potluck HTTP server
//!
//! Serves the recipe pages and the JSON API on top of a [`RecipeStore`]:
//! - `/` lists recipes and accepts new ones via form post
//! - `/recipes` and `/recipes/:id` render list and detail pages
//! - `/api/recipes` and `/api/recipes/:id` return JSON
//! - `/assets/*` serves the static files (stylesheet, browser script)

pub mod config;
mod handlers;
mod routes;
pub mod views;

pub use config::PotluckConfig;
pub use handlers::ApiError;
pub use routes::create_router;

use crate::store::{RecipeStore, StoreOptions};
use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the recipe collection file
    pub data_file: PathBuf,
    /// Optional lock file for cross-process writer exclusion
    pub lock_file: Option<PathBuf>,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_file: PathBuf::from("db/recipes.json"),
            lock_file: None,
            assets_dir: PathBuf::from("public"),
        }
    }
}

/// Shared server state
pub struct ServerState {
    pub config: ServerConfig,
    pub store: RecipeStore,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        let options = StoreOptions {
            lock_file: config.lock_file.clone(),
            ..StoreOptions::default()
        };
        let store = RecipeStore::with_options(config.data_file.clone(), options);

        Self { config, store }
    }
}

/// Shared state handle passed to handlers
pub type SharedState = Arc<ServerState>;

/// Start the Potluck server
pub async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting Potluck server on {}", config.bind_addr);
    tracing::info!("Recipe file: {:?}", config.data_file);
    tracing::info!("Assets: {:?}", config.assets_dir);
    match config.lock_file {
        Some(ref lock) => tracing::info!("Writer lock file: {:?}", lock),
        None => tracing::info!("Writer lock file: none (single writer process assumed)"),
    }

    let state = Arc::new(ServerState::new(config.clone()));

    if !state.store.path().exists() {
        tracing::warn!(
            "Recipe file {:?} does not exist; run `potluck init` to create it",
            state.store.path()
        );
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Potluck is ready to serve");

    axum::serve(listener, app).await?;
    Ok(())
}
