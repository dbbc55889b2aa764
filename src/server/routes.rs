// src/server/routes.rs
//! Axum router configuration for the Potluck server

use crate::server::SharedState;
use crate::server::handlers::{api, pages};
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_router(state: SharedState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // HTML pages
        .route("/", get(pages::home).post(pages::create))
        .route("/recipes", get(pages::list))
        .route("/recipes/:id", get(pages::detail))
        // JSON API
        .route(
            "/api/recipes",
            get(api::list_recipes).post(api::create_recipe),
        )
        .route("/api/recipes/:id", get(api::get_recipe))
        // Stylesheet and browser script
        .nest_service("/assets", assets)
        .layer(CompressionLayer::new())
        // Request/response logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
