//! Recommendation retrieval: latest incorrect topics plus up to three materials.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::{RecommendationResult, MAX_RECOMMENDATIONS};
use crate::error::AppError;
use crate::recommender::Recommender;
use crate::store::Catalog;
use crate::util::non_blank;

#[derive(Clone)]
pub struct RecommendationProvider {
  catalog: Arc<dyn Catalog>,
  recommender: Arc<dyn Recommender>,
}

impl RecommendationProvider {
  pub fn new(catalog: Arc<dyn Catalog>, recommender: Arc<dyn Recommender>) -> Self {
    Self { catalog, recommender }
  }

  /// Read-only. Topics come from the single newest attempt, never merged across attempts.
  #[instrument(level = "info", skip(self), fields(recommender = self.recommender.name()))]
  pub async fn get_recommendations(&self, user_id: Option<&str>) -> Result<RecommendationResult, AppError> {
    let user_id = user_id.and_then(non_blank).ok_or_else(AppError::user_id_required)?;

    let incorrect_topics = self
      .catalog
      .latest_attempt(&user_id)
      .await?
      .map(|a| a.incorrect_topics)
      .unwrap_or_default();

    let mut recommendations = self
      .recommender
      .recommend(&user_id, &incorrect_topics, MAX_RECOMMENDATIONS)
      .await?;
    recommendations.truncate(MAX_RECOMMENDATIONS);

    info!(target: "recommendations", %user_id, count = recommendations.len(), topics = incorrect_topics.len(), "Recommendations served");
    Ok(RecommendationResult { recommendations, incorrect_topics })
  }
}
