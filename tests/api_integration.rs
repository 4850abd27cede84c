//! Integration tests for the progress HTTP API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use magicstick::core::{create_router, create_router_with, ProgressStore, UserProgress};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn save_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/save-progress")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], magicstick::VERSION);
    assert_eq!(json["users"], 1);
}

#[tokio::test]
async fn test_save_progress_adds_to_total() {
    let app = create_router();

    let response = app
        .oneshot(save_request(r#"{"userId": "senior-001", "count": 30}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["userId"], "senior-001");
    assert_eq!(json["data"]["totalFlowers"], 72);
    assert_eq!(json["data"]["unlockedModules"][0], "module-1");
}

#[tokio::test]
async fn test_save_progress_accumulates_across_requests() {
    let app = create_router();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(save_request(r#"{"userId": "senior-001", "count": 4}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(Request::builder().uri("/api/progress/senior-001").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["totalFlowers"], 50);
}

#[tokio::test]
async fn test_save_progress_unknown_user() {
    let app = create_router();

    let response = app
        .oneshot(save_request(r#"{"userId": "junior-404", "count": 3}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "User not found");
}

#[tokio::test]
async fn test_save_progress_bad_body() {
    let app = create_router();

    let response = app.oneshot(save_request("not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_get_progress_not_found() {
    let app = create_router_with(ProgressStore::empty());

    let response = app
        .oneshot(Request::builder().uri("/api/progress/senior-001").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_custom_store_user() {
    let mut store = ProgressStore::empty();
    store.insert(UserProgress::new("junior-007"));
    let app = create_router_with(store);

    let response = app
        .oneshot(save_request(r#"{"userId": "junior-007", "count": 30}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["totalFlowers"], 30);
}
