//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] keyloom_core::Error),
}

impl ApiError {
  /// Classify a backend error through the core taxonomy: validation failures
  /// become 400, missing sessions 404, everything else 500.
  pub fn from_store<E: Into<keyloom_core::Error>>(e: E) -> Self {
    match e.into() {
      keyloom_core::Error::EmptyQuery => {
        ApiError::BadRequest("query must not be empty".to_string())
      }
      keyloom_core::Error::SessionNotFound(id) => {
        ApiError::NotFound(format!("session {id} not found"))
      }
      other => ApiError::Store(other),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
