// src/server/handlers/pages.rs
//! HTML page handlers

use crate::server::{SharedState, views};
use crate::store::StoreError;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::collections::BTreeMap;
use tracing::{debug, info};

fn error_response(err: StoreError) -> Response {
    super::log_store_error(&err);
    (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response()
}

/// GET /
pub async fn home(State(state): State<SharedState>) -> Response {
    match state.store.load_all().await {
        Ok(recipes) => Html(views::home_page(&recipes)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /
///
/// Stores the submitted form as a new recipe and renders the home page
/// from the collection as written. A submitted `id` field is ignored.
pub async fn create(
    State(state): State<SharedState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Response {
    match state.store.append_with_snapshot(fields).await {
        Ok((recipe, recipes)) => {
            info!("Recipe {} submitted via form", recipe.id);
            Html(views::home_page(&recipes)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /recipes
pub async fn list(State(state): State<SharedState>) -> Response {
    match state.store.load_all().await {
        Ok(recipes) => Html(views::recipes_page(&recipes)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /recipes/:id
pub async fn detail(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    match state.store.find_by_id(&id).await {
        Ok(Some(recipe)) => Html(views::recipe_page(&recipe)).into_response(),
        Ok(None) => {
            debug!("No recipe page for {}", id);
            (StatusCode::NOT_FOUND, Html(views::not_found_page(&id))).into_response()
        }
        Err(e) => error_response(e),
    }
}
