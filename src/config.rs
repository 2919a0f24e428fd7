//! Runtime configuration: server settings from the environment and the optional TOML catalog.
//!
//! Environment:
//!   PORT                      : u16 (default 3000)
//!   CATALOG_PATH              : TOML file with `[[materials]]` and `[[attempts]]`
//!   RECOMMENDER_URL           : enables the remote recommendation service
//!   RECOMMENDER_TIMEOUT_SECS  : remote call timeout (default 5)

use std::{net::SocketAddr, time::Duration};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::{Material, QuizAttempt};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RECOMMENDER_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct ServerConfig {
  pub port: u16,
  pub catalog_path: Option<String>,
  pub recommender_url: Option<String>,
  pub recommender_timeout: Duration,
}

impl ServerConfig {
  pub fn from_env() -> Self {
    let port = parse_env("PORT", DEFAULT_PORT);
    let timeout_secs = parse_env("RECOMMENDER_TIMEOUT_SECS", DEFAULT_RECOMMENDER_TIMEOUT_SECS);
    Self {
      port,
      catalog_path: non_empty_env("CATALOG_PATH"),
      recommender_url: non_empty_env("RECOMMENDER_URL").map(|u| u.trim_end_matches('/').to_string()),
      recommender_timeout: Duration::from_secs(timeout_secs),
    }
  }

  pub fn addr(&self) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], self.port))
  }
}

fn non_empty_env(key: &str) -> Option<String> {
  std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T
where
  T::Err: std::fmt::Display,
{
  match std::env::var(key) {
    Ok(raw) => raw.parse().unwrap_or_else(|e| {
      warn!(target: "learnhub_api", %key, %raw, error = %e, "Invalid value; using default");
      default
    }),
    Err(_) => default,
  }
}

/// Catalog file schema.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct CatalogConfig {
  #[serde(default)]
  pub materials: Vec<Material>,
  #[serde(default)]
  pub attempts: Vec<QuizAttempt>,
}

impl CatalogConfig {
  pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(s)
  }
}

/// Load the catalog from `path`. On any IO/parse error, logs and returns None.
pub fn load_catalog(path: &str) -> Option<CatalogConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match CatalogConfig::parse(&s) {
      Ok(cfg) => {
        info!(target: "catalog", %path, materials = cfg.materials.len(), attempts = cfg.attempts.len(), "Loaded catalog (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "catalog", %path, error = %e, "Failed to parse TOML catalog");
        None
      }
    },
    Err(e) => {
      error!(target: "catalog", %path, error = %e, "Failed to read TOML catalog file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_materials_and_attempts() {
    let cfg = CatalogConfig::parse(
      r#"
        [[materials]]
        id = 1
        class_id = 4
        title = "Fractions 101"
        content_url = "https://example.org/fractions"
        type = "video"
        topic_tags = ["fractions"]

        [[attempts]]
        id = "a1"
        user_id = "42"
        created_at = "2024-03-01T10:00:00Z"
        incorrect_topics = ["fractions", "geometry"]
      "#,
    )
    .unwrap();
    assert_eq!(cfg.materials.len(), 1);
    assert_eq!(cfg.materials[0].kind, "video");
    assert_eq!(cfg.materials[0].class_id, Some(4));
    assert_eq!(cfg.materials[0].user_id, None);
    assert_eq!(cfg.attempts[0].incorrect_topics, vec!["fractions", "geometry"]);
  }

  #[test]
  fn missing_file_yields_none() {
    assert!(load_catalog("/definitely/not/here.toml").is_none());
  }
}
