// tests/workflow.rs

//! End-to-end flows through the HTTP router: form submission, list and
//! detail pages, and the JSON API the browser script relies on.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use potluck::{RecipeStore, ServerConfig, ServerState, create_router};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup() -> (TempDir, Router) {
    let temp_dir = tempfile::tempdir().unwrap();
    let data_file = temp_dir.path().join("db").join("recipes.json");
    RecipeStore::open(&data_file).init().await.unwrap();

    let config = ServerConfig {
        data_file,
        assets_dir: temp_dir.path().join("public"),
        ..ServerConfig::default()
    };
    (temp_dir, create_router(Arc::new(ServerState::new(config))))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_submit_and_browse() {
    let (_temp, app) = setup().await;

    let (status, html) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No recipes yet."));

    let (status, _) = send(&app, post_form("title=Soup&ingredients=Water%2C+salt")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, html) = send(&app, post_form("title=Bread&steps=Knead")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.find(">Soup</a>").unwrap() < html.find(">Bread</a>").unwrap());

    let (status, json) = send(&app, get("/api/recipes")).await;
    assert_eq!(status, StatusCode::OK);
    let recipes: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0]["ingredients"], "Water, salt");

    let soup_id = recipes[0]["id"].as_str().unwrap();

    let (status, html) = send(&app, get(&format!("/recipes/{soup_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Water, salt"));

    let (status, json) = send(&app, get(&format!("/api/recipes/{soup_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let soup: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(soup, recipes[0]);

    let (status, html) = send(&app, get("/recipes")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(&format!(r#"href="/recipes/{soup_id}""#)));
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let (_temp, app) = setup().await;

    let (status, _) = send(&app, get("/recipes/zz")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get("/api/recipes/zz")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let problem: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(problem["status"], 404);
}

#[tokio::test]
async fn test_storage_removed_while_running() {
    let (temp, app) = setup().await;
    std::fs::remove_file(temp.path().join("db").join("recipes.json")).unwrap();

    // Missing storage is a failure, never an empty list
    let (status, body) = send(&app, get("/api/recipes")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_ne!(body, "[]");

    let (status, _) = send(&app, post_form("title=Tea")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
