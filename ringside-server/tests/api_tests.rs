//! Integration tests for ringside-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use ringside_core::{BoxerStore, FixedDraw, MemoryStore, NewBoxer};
use ringside_server::{create_router, ServerConfig, ServerState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(draw: f64) -> axum::Router {
    let state = Arc::new(ServerState::with_random(Box::new(FixedDraw(draw))));
    create_router(state)
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn create(app: &axum::Router, name: &str, weight: f64) -> u64 {
    let (status, json) = send(
        app,
        "POST",
        "/api/create-boxer",
        Some(json!({
            "name": name,
            "weight": weight,
            "height": 70.0,
            "reach": 72.0,
            "age": 27
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json["boxer"]["id"].as_u64().unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(0.5);
    let (status, json) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
}

#[tokio::test]
async fn test_create_and_lookup() {
    let app = test_app(0.5);
    let id = create(&app, "Ali", 180.0).await;

    let (status, json) = send(&app, "GET", &format!("/api/get-boxer-by-id/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["boxer"]["name"], "Ali");
    assert_eq!(json["boxer"]["wins"], 0);
    assert_eq!(json["boxer"]["fights"], 0);
    assert_eq!(json["boxer"]["weight_class"], "MIDDLEWEIGHT");

    let (status, json) = send(&app, "GET", "/api/get-boxer-by-name/Ali", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["boxer"]["id"], id);
}

#[tokio::test]
async fn test_create_errors() {
    let app = test_app(0.5);
    create(&app, "Ali", 180.0).await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/create-boxer",
        Some(json!({"name": "Ali", "weight": 150.0, "height": 70.0, "reach": 70.0, "age": 25})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "conflict");

    let (status, json) = send(
        &app,
        "POST",
        "/api/create-boxer",
        Some(json!({"name": "Kid", "weight": 150.0, "height": 70.0, "reach": 70.0, "age": 15})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");
}

#[tokio::test]
async fn test_unknown_boxer_is_404() {
    let app = test_app(0.5);
    let (status, json) = send(&app, "GET", "/api/get-boxer-by-id/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "not_found");

    let (status, _) = send(&app, "DELETE", "/api/delete-boxer/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_bout_flow() {
    // Draw 0.0 always goes to the first boxer in
    let app = test_app(0.0);
    let a = create(&app, "A", 180.0).await;
    let b = create(&app, "B", 200.0).await;

    let (status, json) = send(&app, "POST", "/api/enter-ring", Some(json!({"id": a}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ring_state"], "One");
    let (status, json) = send(&app, "POST", "/api/enter-ring", Some(json!({"name": "B"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ring_state"], "Two");

    let (status, json) = send(&app, "GET", "/api/fight", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["winner"], "A");
    assert_eq!(json["winner_id"], a);
    assert_eq!(json["loser_id"], b);

    let (_, json) = send(&app, "GET", "/api/get-boxers", None).await;
    assert_eq!(json["boxers"].as_array().unwrap().len(), 0);

    let (status, json) = send(&app, "GET", "/api/leaderboard?sort=win_pct", None).await;
    assert_eq!(status, StatusCode::OK);
    let board = json["leaderboard"].as_array().unwrap();
    assert_eq!(board[0]["name"], "A");
    assert_eq!(board[0]["win_pct"], 1.0);
    assert_eq!(board[1]["fights"], 1);
}

#[tokio::test]
async fn test_ring_errors() {
    let app = test_app(0.5);
    let a = create(&app, "A", 180.0).await;
    let b = create(&app, "B", 180.0).await;
    let c = create(&app, "C", 180.0).await;
    let light = create(&app, "Light", 110.0).await;

    let (status, json) = send(&app, "GET", "/api/fight", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "insufficient_participants");

    let (status, _) = send(&app, "POST", "/api/enter-ring", Some(json!({"id": light}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    send(&app, "POST", "/api/enter-ring", Some(json!({"id": a}))).await;
    let (status, json) = send(&app, "POST", "/api/enter-ring", Some(json!({"id": a}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "duplicate");

    send(&app, "POST", "/api/enter-ring", Some(json!({"id": b}))).await;
    let (status, json) = send(&app, "POST", "/api/enter-ring", Some(json!({"id": c}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "capacity");

    let (status, json) = send(&app, "POST", "/api/enter-ring", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let (status, _) = send(&app, "POST", "/api/clear-boxers", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, json) = send(&app, "GET", "/api/get-boxers", None).await;
    assert_eq!(json["ring_state"], "Empty");
}

#[tokio::test]
async fn test_delete_removes_from_ring() {
    let app = test_app(0.5);
    let a = create(&app, "A", 180.0).await;
    let b = create(&app, "B", 180.0).await;
    send(&app, "POST", "/api/enter-ring", Some(json!({"id": a}))).await;
    send(&app, "POST", "/api/enter-ring", Some(json!({"id": b}))).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/delete-boxer/{}", a), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, "GET", "/api/get-boxers", None).await;
    let boxers = json["boxers"].as_array().unwrap();
    assert_eq!(boxers.len(), 1);
    assert_eq!(boxers[0]["id"], b);
}

#[tokio::test]
async fn test_leaderboard_bad_sort() {
    let app = test_app(0.5);
    let (status, json) = send(&app, "GET", "/api/leaderboard?sort=hello", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("hello"));
}

#[tokio::test]
async fn test_snapshot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        data_file: Some(dir.path().join("boxers.json")),
        seed: Some(1),
        ..Default::default()
    };

    let app = create_router(Arc::new(ServerState::from_config(&config).unwrap()));
    let id = create(&app, "Persisted", 180.0).await;

    let restarted = create_router(Arc::new(ServerState::from_config(&config).unwrap()));
    let (status, json) = send(&restarted, "GET", "/api/boxers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["boxers"][0]["id"], id);
    assert_eq!(json["boxers"][0]["name"], "Persisted");
}

#[tokio::test]
async fn test_malformed_requests_are_validation_errors() {
    let app = test_app(0.5);

    let (status, json) = send(
        &app,
        "POST",
        "/api/create-boxer",
        Some(json!({"name": "Neg", "weight": 150.0, "height": 70.0, "reach": 70.0, "age": -3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
    assert_eq!(json["kind"], "validation");

    let (status, json) = send(
        &app,
        "POST",
        "/api/create-boxer",
        Some(json!({"name": "Half", "weight": 150.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");
    assert!(json["message"].as_str().unwrap().contains("height"));

    let (status, json) = send(&app, "GET", "/api/get-boxer-by-id/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let (status, json) = send(&app, "DELETE", "/api/delete-boxer/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let (status, json) = send(&app, "POST", "/api/enter-ring", Some(json!({"id": "one"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "validation");

    let (status, json) = send(&app, "GET", "/api/boxers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["boxers"].as_array().unwrap().len(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mutations_all_reach_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boxers.json");
    let config = ServerConfig {
        data_file: Some(path.clone()),
        seed: Some(3),
        ..Default::default()
    };
    let app = create_router(Arc::new(ServerState::from_config(&config).unwrap()));

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move { create(&app, &format!("Boxer{}", i), 180.0).await })
        })
        .collect();
    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap());
    }
    let max_id = *ids.iter().max().unwrap();

    // Drop the newest boxer: its id must not come back after a reload
    let (status, _) = send(&app, "DELETE", &format!("/api/delete-boxer/{}", max_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let reloaded = MemoryStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 15);
    let next = reloaded
        .insert(NewBoxer::new("Latecomer", 180.0, 70.0, 72.0, 27))
        .unwrap();
    assert!(next.id > max_id, "id {} reused", next.id);

    // Only the snapshot itself is left behind, no temporary files
    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
}
