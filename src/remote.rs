//! Client for an external recommendation service.
//!
//! We POST `{user_id, incorrect_topics}` to `{base_url}/recommend` and expect
//! `{recommendations: [Material]}` back. Any failure is logged and the request is
//! served by the wrapped fallback recommender instead.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::domain::Material;
use crate::recommender::Recommender;
use crate::store::CatalogError;
use crate::util::trunc_for_log;

#[derive(Error, Debug)]
pub enum RemoteError {
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("recommender HTTP {status}: {body}")]
  Status { status: reqwest::StatusCode, body: String },
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
  user_id: &'a str,
  incorrect_topics: &'a [String],
}

#[derive(Deserialize)]
struct RecommendResponse {
  #[serde(default)]
  recommendations: Vec<Material>,
}

pub struct RemoteRecommender {
  client: reqwest::Client,
  base_url: String,
  fallback: Box<dyn Recommender>,
}

impl RemoteRecommender {
  pub fn new(
    base_url: impl Into<String>,
    timeout: Duration,
    fallback: Box<dyn Recommender>,
  ) -> Result<Self, RemoteError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self { client, base_url: base_url.into(), fallback })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  #[instrument(level = "info", skip(self, incorrect_topics), fields(topics = incorrect_topics.len()))]
  async fn call(&self, user_id: &str, incorrect_topics: &[String]) -> Result<Vec<Material>, RemoteError> {
    let url = format!("{}/recommend", self.base_url);
    let res = self.client.post(&url)
      .header(USER_AGENT, "learnhub-api/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&RecommendRequest { user_id, incorrect_topics })
      .send().await?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      return Err(RemoteError::Status { status, body: trunc_for_log(&body, 200) });
    }

    let body: RecommendResponse = res.json().await?;
    Ok(body.recommendations)
  }
}

#[async_trait]
impl Recommender for RemoteRecommender {
  fn name(&self) -> &'static str { "remote" }

  async fn recommend(
    &self,
    user_id: &str,
    incorrect_topics: &[String],
    limit: usize,
  ) -> Result<Vec<Material>, CatalogError> {
    let start = Instant::now();
    match self.call(user_id, incorrect_topics).await {
      Ok(mut materials) => {
        materials.truncate(limit);
        info!(target: "recommendations", elapsed = ?start.elapsed(), count = materials.len(), "Remote recommender answered");
        Ok(materials)
      }
      Err(e) => {
        error!(target: "recommendations", elapsed = ?start.elapsed(), error = %e, fallback = self.fallback.name(), "Remote recommender failed; falling back");
        self.fallback.recommend(user_id, incorrect_topics, limit).await
      }
    }
  }
}
