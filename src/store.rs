//! Material and quiz-attempt storage.
//!
//! The `Catalog` trait is the seam to whatever backs the service. `InMemoryCatalog`
//! keeps everything behind tokio `RwLock`s and is loaded from TOML or built-in seeds.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::CatalogConfig;
use crate::domain::{Material, NewAttempt, QuizAttempt};
use crate::seeds::seed_materials;

#[derive(Error, Debug)]
pub enum CatalogError {
  #[error("catalog unavailable: {0}")]
  Unavailable(String),
}

#[async_trait]
pub trait Catalog: Send + Sync {
  /// Newest attempt for the user by `created_at`, if any.
  async fn latest_attempt(&self, user_id: &str) -> Result<Option<QuizAttempt>, CatalogError>;

  /// Uniform random sample without replacement; returns `min(n, total)` materials.
  async fn sample_materials(&self, n: usize) -> Result<Vec<Material>, CatalogError>;

  async fn record_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt, CatalogError>;

  async fn list_materials(&self) -> Result<Vec<Material>, CatalogError>;
}

#[derive(Clone, Default)]
pub struct InMemoryCatalog {
  materials: Arc<RwLock<Vec<Material>>>,
  attempts: Arc<RwLock<Vec<QuizAttempt>>>,
}

impl InMemoryCatalog {
  pub fn new(materials: Vec<Material>, attempts: Vec<QuizAttempt>) -> Self {
    Self {
      materials: Arc::new(RwLock::new(materials)),
      attempts: Arc::new(RwLock::new(attempts)),
    }
  }

  /// Build from a parsed TOML catalog, or fall back to the built-in seed materials.
  pub fn from_config(cfg: Option<CatalogConfig>) -> Self {
    let (materials, attempts) = match cfg {
      Some(cfg) if !cfg.materials.is_empty() => (cfg.materials, cfg.attempts),
      Some(cfg) => {
        info!(target: "catalog", "Catalog file has no materials; using built-in seeds");
        (seed_materials(), cfg.attempts)
      }
      None => (seed_materials(), Vec::new()),
    };
    info!(target: "catalog", materials = materials.len(), attempts = attempts.len(), "Startup catalog inventory");
    Self::new(materials, attempts)
  }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
  #[instrument(level = "debug", skip(self), fields(%user_id))]
  async fn latest_attempt(&self, user_id: &str) -> Result<Option<QuizAttempt>, CatalogError> {
    let attempts = self.attempts.read().await;
    // max_by_key keeps the last of equal maxima, so later inserts win ties.
    let latest = attempts
      .iter()
      .filter(|a| a.user_id == user_id)
      .max_by_key(|a| a.created_at)
      .cloned();
    Ok(latest)
  }

  #[instrument(level = "debug", skip(self))]
  async fn sample_materials(&self, n: usize) -> Result<Vec<Material>, CatalogError> {
    let materials = self.materials.read().await;
    let mut rng = rand::thread_rng();
    let picked: Vec<Material> = materials.choose_multiple(&mut rng, n).cloned().collect();
    debug!(target: "catalog", requested = n, total = materials.len(), picked = picked.len(), "Sampled materials");
    Ok(picked)
  }

  #[instrument(level = "debug", skip(self, attempt), fields(user_id = %attempt.user_id))]
  async fn record_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt, CatalogError> {
    let stored = QuizAttempt {
      id: Uuid::new_v4().to_string(),
      user_id: attempt.user_id,
      created_at: attempt.created_at.unwrap_or_else(Utc::now),
      incorrect_topics: attempt.incorrect_topics,
    };
    self.attempts.write().await.push(stored.clone());
    info!(target: "catalog", id = %stored.id, user_id = %stored.user_id, topics = stored.incorrect_topics.len(), "Recorded quiz attempt");
    Ok(stored)
  }

  async fn list_materials(&self) -> Result<Vec<Material>, CatalogError> {
    Ok(self.materials.read().await.clone())
  }
}
