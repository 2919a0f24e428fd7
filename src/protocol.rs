//! HTTP request/response DTOs (serde ready).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Material;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
  pub user_id: Option<String>,
}

/// `user_id` arrives as a JSON string or integer; anything else (fractions included) counts as missing.
pub fn user_id_from_json(body: &Value) -> Option<String> {
  match body.get("user_id")? {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => n
      .as_u64()
      .map(|u| u.to_string())
      .or_else(|| n.as_i64().map(|i| i.to_string())),
    _ => None,
  }
}

/// Attempt payload; `user_id` is read separately via `user_id_from_json`.
#[derive(Debug, Deserialize)]
pub struct AttemptIn {
  #[serde(default)]
  pub incorrect_topics: Vec<String>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct MaterialsOut {
  pub materials: Vec<Material>,
}

#[derive(Serialize)]
pub struct ErrorOut {
  pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
