//! Router assembly: HTTP endpoints, JSON 404 fallback, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
  http::{header::CONTENT_TYPE, Method},
  routing::{get, post},
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - recommendations under `/api/recommendations` (query/body) and `/api/recommendations/:student_id`
/// - quiz attempt recording and material listing
/// - JSON 404 for unknown paths, JSON 405 for unsupported methods on known ones
/// - CORS: any origin, `GET, POST, OPTIONS`, `Content-Type`
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/api/health", get(http::http_health).fallback(http::http_method_not_allowed))
    .route(
      "/api/recommendations",
      get(http::http_get_recommendations)
        .post(http::http_post_recommendations)
        .fallback(http::http_method_not_allowed),
    )
    .route(
      "/api/recommendations/:student_id",
      get(http::http_get_student_recommendations).fallback(http::http_method_not_allowed),
    )
    .route("/api/quiz-attempts", post(http::http_post_quiz_attempt).fallback(http::http_method_not_allowed))
    .route("/api/materials", get(http::http_get_materials).fallback(http::http_method_not_allowed))
    .fallback(http::http_not_found)
    .with_state(state)
    .layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]),
    )
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
