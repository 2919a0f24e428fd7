//! LearnHub API server.
//!
//! Important env variables:
//!   PORT                      : u16 (default 3000)
//!   CATALOG_PATH              : TOML catalog of materials and quiz attempts
//!   RECOMMENDER_URL           : enables the remote recommendation service
//!   RECOMMENDER_TIMEOUT_SECS  : remote call timeout (default 5)
//!   LOG_LEVEL                 : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT                : "pretty" (default) or "json"

use std::sync::Arc;

use learnhub_api::{build_router, config::ServerConfig, telemetry, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = ServerConfig::from_env();
  let state = Arc::new(AppState::from_config(&cfg));
  let app = build_router(state);

  let addr = cfg.addr();
  let listener = TcpListener::bind(addr).await?;
  info!(target: "learnhub_api", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "learnhub_api", error = %e, "Failed to listen for shutdown signal");
  }
  info!(target: "learnhub_api", "Shutdown signal received");
}
