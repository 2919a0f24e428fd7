//! LearnHub · learning recommendations API
//!
//! - Axum HTTP API with permissive CORS and JSON errors
//! - Recommendations: latest incorrect quiz topics + up to three materials
//! - Pluggable recommender (random sampling, optional remote service)

pub mod config;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod provider;
pub mod recommender;
pub mod remote;
pub mod routes;
pub mod seeds;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;

pub use routes::build_router;
pub use state::AppState;
