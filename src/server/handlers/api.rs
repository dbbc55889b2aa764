// src/server/handlers/api.rs
//! JSON API handlers
//!
//! - `GET /api/recipes` - full collection as a JSON array
//! - `GET /api/recipes/:id` - one recipe, or a 404 problem document
//! - `POST /api/recipes` - create from a JSON object of string fields

use super::{ApiError, ApiResult};
use crate::server::SharedState;
use crate::store::{Recipe, RecipeCollection};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// GET /api/recipes
pub async fn list_recipes(State(state): State<SharedState>) -> ApiResult<Json<RecipeCollection>> {
    let recipes = state.store.load_all().await?;
    Ok(Json(recipes))
}

/// GET /api/recipes/:id
pub async fn get_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Recipe>> {
    match state.store.find_by_id(&id).await? {
        Some(recipe) => Ok(Json(recipe)),
        None => {
            debug!("API lookup for unknown recipe {}", id);
            Err(ApiError::not_found(&format!("Recipe {}", id)))
        }
    }
}

/// POST /api/recipes
///
/// Returns 201 Created with the stored recipe and its Location.
pub async fn create_recipe(
    State(state): State<SharedState>,
    body: Result<Json<BTreeMap<String, String>>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(fields) = body.map_err(|e| ApiError::bad_request(&e.body_text()))?;

    let recipe = state.store.append(fields).await?;
    info!("Recipe {} created via API", recipe.id);

    let location = format!("/api/recipes/{}", recipe.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(recipe),
    )
        .into_response())
}
