//! HTTP endpoint handlers. These are thin wrappers that forward to the provider and catalog.
//! Every response, errors included, is JSON.

use std::sync::Arc;

use axum::{
  body::Bytes,
  extract::{
    rejection::{PathRejection, QueryRejection},
    Path, Query, State,
  },
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::domain::{NewAttempt, RecommendationResult};
use crate::error::AppError;
use crate::protocol::*;
use crate::state::AppState;
use crate::util::non_blank;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_recommendations(
  State(state): State<Arc<AppState>>,
  query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<RecommendationResult>, AppError> {
  let Query(q) = query?;
  let res = state.provider.get_recommendations(q.user_id.as_deref()).await?;
  Ok(Json(res))
}

/// Body `user_id` wins; an empty body falls back to the query string.
#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_post_recommendations(
  State(state): State<Arc<AppState>>,
  query: Result<Query<RecommendationQuery>, QueryRejection>,
  body: Bytes,
) -> Result<Json<RecommendationResult>, AppError> {
  let Query(q) = query?;
  let from_body = if body.iter().all(u8::is_ascii_whitespace) {
    None
  } else {
    user_id_from_json(&parse_json(&body)?)
  };
  let user_id = from_body.or(q.user_id);
  let res = state.provider.get_recommendations(user_id.as_deref()).await?;
  Ok(Json(res))
}

#[instrument(level = "info", skip_all)]
pub async fn http_get_student_recommendations(
  State(state): State<Arc<AppState>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<RecommendationResult>, AppError> {
  let Path(student_id) = path?;
  let res = state.provider.get_recommendations(Some(&student_id)).await?;
  Ok(Json(res))
}

#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_post_quiz_attempt(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<impl IntoResponse, AppError> {
  let value = parse_json(&body)?;
  let user_id = user_id_from_json(&value)
    .as_deref()
    .and_then(non_blank)
    .ok_or_else(AppError::user_id_required)?;
  let input: AttemptIn = serde_json::from_value(value)
    .map_err(|e| AppError::Validation(format!("Invalid attempt: {e}")))?;

  let stored = state
    .catalog
    .record_attempt(NewAttempt {
      user_id,
      created_at: input.created_at,
      incorrect_topics: input.incorrect_topics,
    })
    .await?;
  info!(target: "learnhub_api", id = %stored.id, user_id = %stored.user_id, "HTTP quiz attempt recorded");
  Ok((StatusCode::CREATED, Json(stored)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_materials(
  State(state): State<Arc<AppState>>,
) -> Result<Json<MaterialsOut>, AppError> {
  let materials = state.catalog.list_materials().await?;
  Ok(Json(MaterialsOut { materials }))
}

pub async fn http_not_found() -> AppError { AppError::NotFound }

pub async fn http_method_not_allowed() -> AppError { AppError::MethodNotAllowed }

fn parse_json(body: &[u8]) -> Result<Value, AppError> {
  serde_json::from_slice(body).map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))
}
