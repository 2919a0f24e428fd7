//! Error taxonomy surfaced over HTTP. Every variant renders as `{"error": "..."}`.

use axum::{
  extract::rejection::{PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::error;

use crate::protocol::ErrorOut;
use crate::store::CatalogError;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("{0}")]
  Validation(String),

  #[error("Internal server error: {0}")]
  Internal(String),

  #[error("Endpoint not found")]
  NotFound,

  #[error("Method not allowed")]
  MethodNotAllowed,
}

impl AppError {
  pub fn user_id_required() -> Self {
    AppError::Validation("user_id is required".into())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::NotFound => StatusCode::NOT_FOUND,
      AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
    }
  }
}

impl From<CatalogError> for AppError {
  fn from(e: CatalogError) -> Self {
    AppError::Internal(e.to_string())
  }
}

impl From<QueryRejection> for AppError {
  fn from(e: QueryRejection) -> Self {
    AppError::Validation(e.body_text())
  }
}

impl From<PathRejection> for AppError {
  fn from(e: PathRejection) -> Self {
    AppError::Validation(e.body_text())
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      error!(target: "learnhub_api", error = %self, "Request failed");
    }
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}
