//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use questboard_test_support::{FixedClock, InMemoryCharacterRepository, InMemoryQuestRepository};
use tower::ServiceExt;

use questboard_api::routes;
use questboard_api::state::AppState;

/// Application state over empty in-memory stores and a fixed clock.
pub fn test_state() -> AppState {
    AppState::new(
        Arc::new(FixedClock::default()),
        Arc::new(InMemoryCharacterRepository::new()),
        Arc::new(InMemoryQuestRepository::new()),
    )
}

/// Build the full app router over `state`. Uses the same route tree as
/// `main.rs`.
pub fn build_test_app(state: AppState) -> Router {
    routes::api_router().with_state(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a request with a JSON body and return the response.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, body).await
}

/// Send a bodiless request and return the response.
pub async fn send_empty(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send_empty(app, "GET", uri).await
}

/// Create a character through the API and return its id.
pub async fn create_character(state: &AppState, name: &str, class: &str) -> i64 {
    let (status, json) = post_json(
        build_test_app(state.clone()),
        "/api/v1/characters",
        &serde_json::json!({ "name": name, "class": class }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_i64().unwrap()
}

/// Create a quest through the API and return its id.
pub async fn create_quest(state: &AppState, name: &str, experience: i64) -> i64 {
    let (status, json) = post_json(
        build_test_app(state.clone()),
        "/api/v1/quests",
        &serde_json::json!({
            "name": name,
            "description": "A quest worth taking on",
            "experience": experience
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_i64().unwrap()
}
