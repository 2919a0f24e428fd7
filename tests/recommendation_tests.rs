use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use learnhub_api::{
    build_router,
    domain::{Material, NewAttempt, QuizAttempt},
    store::{Catalog, CatalogError, InMemoryCatalog},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn material(id: u64) -> Material {
    Material {
        id,
        user_id: None,
        class_id: Some(1),
        title: format!("Material {id}"),
        content_url: format!("https://example.org/materials/{id}"),
        kind: "video".into(),
        topic_tags: vec!["fractions".into()],
    }
}

fn five_materials() -> Vec<Material> {
    (1..=5).map(material).collect()
}

fn app_with(catalog: Arc<dyn Catalog>) -> Router {
    build_router(Arc::new(AppState::with_catalog(catalog)))
}

async fn app_with_user_42() -> Router {
    let catalog = Arc::new(InMemoryCatalog::new(five_materials(), vec![]));
    catalog
        .record_attempt(NewAttempt {
            user_id: "42".into(),
            created_at: None,
            incorrect_topics: vec!["fractions".into(), "geometry".into()],
        })
        .await
        .unwrap();
    app_with(catalog)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!("non-JSON body {}", String::from_utf8_lossy(&body))
    });
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn assert_from_set(json: &Value, expected_len: usize) {
    let recs = json["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), expected_len);
    for rec in recs {
        let id = rec["id"].as_u64().unwrap();
        assert!((1..=5).contains(&id), "unexpected material id {id}");
    }
}

#[tokio::test]
async fn test_user_42_scenario_via_query() {
    let app = app_with_user_42().await;
    let (status, json) = send(&app, get("/api/recommendations?user_id=42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["incorrect_topics"], json!(["fractions", "geometry"]));
    assert_from_set(&json, 3);
}

#[tokio::test]
async fn test_user_42_scenario_via_body_and_path() {
    let app = app_with_user_42().await;

    let (status, json) = send(&app, post_json("/api/recommendations", json!({ "user_id": 42 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["incorrect_topics"], json!(["fractions", "geometry"]));
    assert_from_set(&json, 3);

    let (status, json) = send(&app, get("/api/recommendations/42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["incorrect_topics"], json!(["fractions", "geometry"]));
    assert_from_set(&json, 3);
}

#[tokio::test]
async fn test_material_fields_are_serialized() {
    let app = app_with_user_42().await;
    let (_, json) = send(&app, get("/api/recommendations/42")).await;
    let first = &json["recommendations"][0];
    assert_eq!(first["type"], "video");
    assert_eq!(first["class_id"], 1);
    assert!(first["user_id"].is_null());
    assert_eq!(first["topic_tags"], json!(["fractions"]));
}

#[tokio::test]
async fn test_unknown_user_gets_empty_topics() {
    let app = app_with_user_42().await;
    let (status, json) = send(&app, get("/api/recommendations?user_id=7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["incorrect_topics"], json!([]));
}

#[tokio::test]
async fn test_fewer_materials_than_cap() {
    let app = app_with(Arc::new(InMemoryCatalog::new(vec![material(1), material(2)], vec![])));
    let (status, json) = send(&app, get("/api/recommendations?user_id=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_missing_user_id_returns_400() {
    let app = app_with_user_42().await;
    let expected = json!({ "error": "user_id is required" });

    let (status, json) = send(&app, get("/api/recommendations")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, expected);

    let (status, json) = send(&app, post_json("/api/recommendations", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, expected);

    let (status, json) = send(&app, get("/api/recommendations?user_id=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, expected);
}

#[tokio::test]
async fn test_post_with_empty_body_uses_query() {
    let app = app_with_user_42().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/recommendations?user_id=42")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["incorrect_topics"], json!(["fractions", "geometry"]));
}

#[tokio::test]
async fn test_malformed_body_returns_json_400() {
    let app = app_with_user_42().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/recommendations")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

struct FailingCatalog;

#[async_trait]
impl Catalog for FailingCatalog {
    async fn latest_attempt(&self, _: &str) -> Result<Option<QuizAttempt>, CatalogError> {
        Err(CatalogError::Unavailable("connection reset".into()))
    }
    async fn sample_materials(&self, _: usize) -> Result<Vec<Material>, CatalogError> {
        Err(CatalogError::Unavailable("connection reset".into()))
    }
    async fn record_attempt(&self, _: NewAttempt) -> Result<QuizAttempt, CatalogError> {
        Err(CatalogError::Unavailable("connection reset".into()))
    }
    async fn list_materials(&self) -> Result<Vec<Material>, CatalogError> {
        Err(CatalogError::Unavailable("connection reset".into()))
    }
}

#[tokio::test]
async fn test_storage_failure_returns_500() {
    let app = app_with(Arc::new(FailingCatalog));
    let (status, json) = send(&app, get("/api/recommendations?user_id=42")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Internal server error:"), "got {message}");
    assert!(message.contains("connection reset"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = app_with_user_42().await;
    let (status, json) = send(&app, get("/api/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "Endpoint not found" }));
}

#[tokio::test]
async fn test_responses_are_json_with_cors() {
    let app = app_with_user_42().await;
    let request = Request::builder()
        .uri("/api/recommendations/42")
        .header("origin", "https://school.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["content-type"], "application/json");

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/recommendations")
        .header("origin", "https://school.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(preflight).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    for m in ["GET", "POST", "OPTIONS"] {
        assert!(methods.contains(m), "missing {m} in {methods}");
    }
    assert_eq!(headers["access-control-allow-headers"], "content-type");
}

#[tokio::test]
async fn test_recorded_attempt_replaces_topics() {
    let app = app_with_user_42().await;
    let (status, json) = send(
        &app,
        post_json(
            "/api/quiz-attempts",
            json!({ "user_id": "42", "incorrect_topics": ["decimals"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["user_id"], "42");
    assert!(json["id"].as_str().is_some_and(|id| !id.is_empty()));

    let (_, json) = send(&app, get("/api/recommendations/42")).await;
    assert_eq!(json["incorrect_topics"], json!(["decimals"]));
}

#[tokio::test]
async fn test_attempt_without_user_returns_400() {
    let app = app_with_user_42().await;
    let (status, json) = send(&app, post_json("/api/quiz-attempts", json!({ "incorrect_topics": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "user_id is required" }));
}

#[tokio::test]
async fn test_materials_and_health() {
    let app = app_with_user_42().await;
    let (status, json) = send(&app, get("/api/materials")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["materials"].as_array().unwrap().len(), 5);

    let (status, json) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "ok": true }));
}

async fn assert_json_error(app: &Router, request: Request<Body>, expected: StatusCode) -> String {
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), expected);
    assert_eq!(response.headers()["content-type"], "application/json");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    json["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_bad_query_string_returns_json_400() {
    let app = app_with_user_42().await;
    let message = assert_json_error(
        &app,
        get("/api/recommendations?user_id=1&user_id=2"),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(message.contains("duplicate field"), "got {message}");

    let request = Request::builder()
        .method("POST")
        .uri("/api/recommendations?user_id=1&user_id=2")
        .body(Body::empty())
        .unwrap();
    assert_json_error(&app, request, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_invalid_path_segment_returns_json_400() {
    let app = app_with_user_42().await;
    let message = assert_json_error(&app, get("/api/recommendations/%FF"), StatusCode::BAD_REQUEST).await;
    assert!(message.contains("student_id"), "got {message}");
}

#[tokio::test]
async fn test_unsupported_method_returns_json_405() {
    let app = app_with_user_42().await;
    let cases = [
        ("POST", "/api/recommendations/42"),
        ("DELETE", "/api/recommendations"),
        ("GET", "/api/quiz-attempts"),
        ("PUT", "/api/materials"),
    ];
    for (method, uri) in cases {
        let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let message = assert_json_error(&app, request, StatusCode::METHOD_NOT_ALLOWED).await;
        assert_eq!(message, "Method not allowed");
    }
}
