//! Pluggable material selection.
//!
//! `RandomSample` is the current policy: no ranking, no filtering by topic, class or user.
//! A remote recommendation service can be swapped in through the same trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::Material;
use crate::store::{Catalog, CatalogError};

#[async_trait]
pub trait Recommender: Send + Sync {
  /// Short label for logs.
  fn name(&self) -> &'static str;

  async fn recommend(
    &self,
    user_id: &str,
    incorrect_topics: &[String],
    limit: usize,
  ) -> Result<Vec<Material>, CatalogError>;
}

pub struct RandomSample {
  catalog: Arc<dyn Catalog>,
}

impl RandomSample {
  pub fn new(catalog: Arc<dyn Catalog>) -> Self {
    Self { catalog }
  }
}

#[async_trait]
impl Recommender for RandomSample {
  fn name(&self) -> &'static str { "random_sample" }

  #[instrument(level = "debug", skip_all, fields(user_id = %_user_id, limit = limit))]
  async fn recommend(
    &self,
    _user_id: &str,
    _incorrect_topics: &[String],
    limit: usize,
  ) -> Result<Vec<Material>, CatalogError> {
    self.catalog.sample_materials(limit).await
  }
}
