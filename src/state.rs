//! Application state: the catalog and the recommendation provider wired over it.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::config::{load_catalog, ServerConfig};
use crate::provider::RecommendationProvider;
use crate::recommender::{RandomSample, Recommender};
use crate::remote::RemoteRecommender;
use crate::store::{Catalog, InMemoryCatalog};

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<dyn Catalog>,
  pub provider: RecommendationProvider,
}

impl AppState {
  /// State over an explicit catalog with the random-sampling recommender.
  pub fn with_catalog(catalog: Arc<dyn Catalog>) -> Self {
    let recommender: Arc<dyn Recommender> = Arc::new(RandomSample::new(catalog.clone()));
    Self::with_parts(catalog, recommender)
  }

  pub fn with_parts(catalog: Arc<dyn Catalog>, recommender: Arc<dyn Recommender>) -> Self {
    let provider = RecommendationProvider::new(catalog.clone(), recommender);
    Self { catalog, provider }
  }

  /// Build state from config: load the catalog, pick the recommender.
  #[instrument(level = "info", skip_all)]
  pub fn from_config(cfg: &ServerConfig) -> Self {
    let catalog_cfg = cfg.catalog_path.as_deref().and_then(load_catalog);
    let catalog: Arc<dyn Catalog> = Arc::new(InMemoryCatalog::from_config(catalog_cfg));

    let sampler = RandomSample::new(catalog.clone());
    let recommender: Arc<dyn Recommender> = match &cfg.recommender_url {
      Some(url) => match RemoteRecommender::new(url.clone(), cfg.recommender_timeout, Box::new(sampler)) {
        Ok(remote) => {
          info!(target: "learnhub_api", base_url = %remote.base_url(), timeout = ?cfg.recommender_timeout, "Remote recommender enabled.");
          Arc::new(remote)
        }
        Err(e) => {
          error!(target: "learnhub_api", %url, error = %e, "Failed to build remote recommender; using random sampling.");
          Arc::new(RandomSample::new(catalog.clone()))
        }
      },
      None => {
        info!(target: "learnhub_api", "Remote recommender disabled (no RECOMMENDER_URL). Using random sampling.");
        Arc::new(sampler)
      }
    };

    Self::with_parts(catalog, recommender)
  }
}
