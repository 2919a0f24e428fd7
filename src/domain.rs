//! Domain models: learning materials, quiz attempts, and the computed recommendation result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most materials a single recommendation response may carry.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// A learning resource record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Material {
  pub id: u64,
  #[serde(default)] pub user_id: Option<u64>,
  #[serde(default)] pub class_id: Option<u64>,
  pub title: String,
  pub content_url: String,
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(default)] pub topic_tags: Vec<String>,
}

/// A stored quiz submission. Immutable once written.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizAttempt {
  pub id: String,
  pub user_id: String,
  pub created_at: DateTime<Utc>,
  #[serde(default)] pub incorrect_topics: Vec<String>,
}

/// Input for recording a new attempt; id and (optionally) timestamp are assigned by the catalog.
#[derive(Clone, Debug)]
pub struct NewAttempt {
  pub user_id: String,
  pub created_at: Option<DateTime<Utc>>,
  pub incorrect_topics: Vec<String>,
}

/// Per-request result, never persisted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RecommendationResult {
  pub recommendations: Vec<Material>,
  pub incorrect_topics: Vec<String>,
}
