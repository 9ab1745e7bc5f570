//! Integration tests for the Account Manager Server API
//!
//! These tests verify the complete request/response cycle for all endpoints.

use account_manager_server::{build_router, cache, open_database, AppState, Config};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a test configuration
fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,                // Random port
        database_path: "".to_string(), // Will be set per test
        cache_database_url: None,
        allowed_origins: vec!["http://localhost:5173".to_string()],
        environment: "test".to_string(),
        log_requests: false,
    }
}

/// Create app state over a fresh database in a temporary directory
async fn create_test_state(temp_dir: &TempDir) -> AppState {
    let db_path = temp_dir.path().join("test.redb");
    let db = open_database(&db_path).expect("Failed to create test database");

    let mut config = test_config();
    config.database_path = db_path.to_string_lossy().into_owned();

    AppState::new(db, None, config).await
}

/// Create a test app router
fn create_test_app(state: &AppState) -> Router {
    build_router(state.clone())
}

/// Parse response body as JSON
async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a request with a JSON body
fn make_json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Create a GET request
fn make_get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Create a DELETE request
fn make_delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Create a user through the API and return its id
async fn create_user(state: &AppState, email: &str, password: &str) -> String {
    let body = json!({ "email": email, "password": password });
    let response = create_test_app(state)
        .oneshot(make_json_request("POST", "/api/users", body.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_to_json(response.into_body()).await;
    body["id"].as_str().unwrap().to_string()
}

/// Send a screen event and return (status, body)
async fn send_event(state: &AppState, event: Value) -> (StatusCode, Value) {
    let response = create_test_app(state)
        .oneshot(make_json_request(
            "POST",
            "/api/screen/events",
            event.to_string(),
        ))
        .await
        .unwrap();

    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check_returns_healthy() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;
    let app = create_test_app(&state);

    let response = app.oneshot(make_get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["cache"], "disabled");
    assert_eq!(body["environment"], "test");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_health_check_reports_cache() {
    let temp_dir = TempDir::new().unwrap();
    let db = open_database(temp_dir.path().join("test.redb")).unwrap();
    let pool = cache::open_cache("sqlite::memory:").await.unwrap();
    let state = AppState::new(db, Some(cache::UserDao::new(pool)), test_config()).await;

    let response = create_test_app(&state)
        .oneshot(make_get_request("/health"))
        .await
        .unwrap();

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cache"], "connected");
}

// =============================================================================
// User Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_create_and_list_users() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;

    let first = create_user(&state, "ana@example.com", "pw1").await;
    let second = create_user(&state, "ben@example.com", "pw2").await;

    let response = create_test_app(&state)
        .oneshot(make_get_request("/api/users"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], first.as_str());
    assert_eq!(users[0]["email"], "ana@example.com");
    assert_eq!(users[0]["password"], "pw1");
    assert_eq!(users[1]["id"], second.as_str());
}

#[tokio::test]
async fn test_create_duplicate_email_is_allowed() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;

    let first = create_user(&state, "same@example.com", "pw").await;
    let second = create_user(&state, "same@example.com", "pw").await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_create_user_missing_field() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;

    let body = json!({ "email": "only@example.com" });
    let response = create_test_app(&state)
        .oneshot(make_json_request("POST", "/api/users", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_user() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;
    let id = create_user(&state, "ana@example.com", "pw1").await;

    let response = create_test_app(&state)
        .oneshot(make_get_request(&format!("/api/users/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["email"], "ana@example.com");

    let response = create_test_app(&state)
        .oneshot(make_get_request("/api/users/does-not-exist"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_update_user_overwrites_fields() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;
    let id = create_user(&state, "old@example.com", "old").await;

    let body = json!({ "email": "new@example.com", "password": "new" });
    let response = create_test_app(&state)
        .oneshot(make_json_request(
            "PUT",
            &format!("/api/users/{}", id),
            body.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["success"], true);

    let response = create_test_app(&state)
        .oneshot(make_get_request(&format!("/api/users/{}", id)))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["password"], "new");
}

#[tokio::test]
async fn test_update_unknown_user_returns_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;

    let body = json!({ "email": "x@example.com", "password": "x" });
    let response = create_test_app(&state)
        .oneshot(make_json_request("PUT", "/api/users/missing", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;
    let keep = create_user(&state, "keep@example.com", "pw").await;
    let drop = create_user(&state, "drop@example.com", "pw").await;

    let response = create_test_app(&state)
        .oneshot(make_delete_request(&format!("/api/users/{}", drop)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = create_test_app(&state)
        .oneshot(make_get_request("/api/users"))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![keep.as_str()]);

    // Deleting again still succeeds
    let response = create_test_app(&state)
        .oneshot(make_delete_request(&format!("/api/users/{}", drop)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Screen Session Tests
// =============================================================================

#[tokio::test]
async fn test_screen_starts_on_fetched_list() {
    let temp_dir = TempDir::new().unwrap();
    let db = open_database(temp_dir.path().join("test.redb")).unwrap();

    // Seed the store before the session starts
    let seed = AppState::new(db.clone(), None, test_config()).await;
    create_user(&seed, "seed@example.com", "pw").await;

    let state = AppState::new(db, None, test_config()).await;
    let response = create_test_app(&state)
        .oneshot(make_get_request("/api/screen"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["view"]["screen"], "list");
    assert_eq!(body["view"]["users"][0]["email"], "seed@example.com");
    assert!(body["notice"].is_null());
}

#[tokio::test]
async fn test_screen_registration_flow() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;

    let (status, body) = send_event(&state, json!({ "type": "show_login" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["screen"], "login");

    send_event(&state, json!({ "type": "set_email", "value": "ana@example.com" })).await;
    let (_, body) = send_event(&state, json!({ "type": "set_password", "value": "pw" })).await;
    assert_eq!(body["view"]["email"], "ana@example.com");
    assert_eq!(body["view"]["password"], "pw");

    let (status, body) = send_event(&state, json!({ "type": "submit_registration" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["screen"], "login");
    assert_eq!(body["view"]["email"], "");
    assert_eq!(body["view"]["password"], "");
    assert_eq!(body["notice"], "User registered");

    let (_, body) = send_event(&state, json!({ "type": "go_to_list" })).await;
    assert_eq!(body["view"]["screen"], "list");
    assert_eq!(body["view"]["users"].as_array().unwrap().len(), 1);
    assert_eq!(body["view"]["users"][0]["email"], "ana@example.com");
    assert!(body["notice"].is_null());
}

#[tokio::test]
async fn test_screen_edit_flow() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;
    let id = create_user(&state, "old@example.com", "old").await;

    let (_, body) = send_event(&state, json!({ "type": "refresh" })).await;
    assert_eq!(body["view"]["users"].as_array().unwrap().len(), 1);

    let (status, body) = send_event(&state, json!({ "type": "edit_pressed", "index": 0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["screen"], "edit");
    assert_eq!(body["view"]["id"], id.as_str());
    assert_eq!(body["view"]["email"], "old@example.com");

    send_event(&state, json!({ "type": "set_email", "value": "new@example.com" })).await;
    let (status, body) = send_event(&state, json!({ "type": "submit_update" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["screen"], "list");
    assert_eq!(body["view"]["users"][0]["email"], "new@example.com");
    assert_eq!(body["view"]["users"][0]["password"], "old");
    assert_eq!(body["notice"], "User updated");
}

#[tokio::test]
async fn test_screen_back_discards_edit() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;
    create_user(&state, "keep@example.com", "pw").await;

    send_event(&state, json!({ "type": "refresh" })).await;
    send_event(&state, json!({ "type": "edit_pressed", "index": 0 })).await;
    send_event(&state, json!({ "type": "set_email", "value": "typed@example.com" })).await;

    let (status, body) = send_event(&state, json!({ "type": "back_pressed" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["screen"], "list");
    assert_eq!(body["view"]["users"][0]["email"], "keep@example.com");
}

#[tokio::test]
async fn test_screen_delete_removes_row() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;
    let first = create_user(&state, "a@example.com", "pw").await;
    let second = create_user(&state, "b@example.com", "pw").await;

    send_event(&state, json!({ "type": "refresh" })).await;
    let (status, body) = send_event(&state, json!({ "type": "delete", "index": 0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "User deleted");

    let users = body["view"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], second.as_str());
    assert!(users.iter().all(|u| u["id"] != first.as_str()));

    // The store agrees
    let response = create_test_app(&state)
        .oneshot(make_get_request(&format!("/api/users/{}", first)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_screen_invalid_transition_returns_conflict() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;
    create_user(&state, "a@example.com", "pw").await;
    create_user(&state, "b@example.com", "pw").await;

    send_event(&state, json!({ "type": "refresh" })).await;
    let (_, body) = send_event(&state, json!({ "type": "delete", "index": 0 })).await;
    assert_eq!(body["notice"], "User deleted");

    let (status, body) = send_event(&state, json!({ "type": "back_pressed" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Cannot back_pressed from the list screen");

    let (status, _) = send_event(&state, json!({ "type": "submit_registration" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // State is untouched
    let response = create_test_app(&state)
        .oneshot(make_get_request("/api/screen"))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["view"]["screen"], "list");
    assert_eq!(body["view"]["users"].as_array().unwrap().len(), 1);
    assert_eq!(body["notice"], "User deleted");
}

#[tokio::test]
async fn test_screen_edit_without_record_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;

    let (status, body) = send_event(&state, json!({ "type": "edit_pressed", "index": 3 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No record selected");

    let response = create_test_app(&state)
        .oneshot(make_get_request("/api/screen"))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["view"]["screen"], "list");
    assert!(body["view"]["users"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_screen_unknown_event_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let state = create_test_state(&temp_dir).await;

    let response = create_test_app(&state)
        .oneshot(make_json_request(
            "POST",
            "/api/screen/events",
            json!({ "type": "teleport" }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
