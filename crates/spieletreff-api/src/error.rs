//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message returned for every rejected registration, whatever the cause.
pub const INVALID_SUBMISSION: &str = "Invalid submission data";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The registration body was malformed or lacked a required field.
  #[error("invalid submission: {0}")]
  InvalidSubmission(String),
}

impl From<spieletreff_core::Error> for ApiError {
  fn from(e: spieletreff_core::Error) -> Self {
    match e {
      spieletreff_core::Error::Validation(v) => {
        ApiError::InvalidSubmission(v.to_string())
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::InvalidSubmission(_) => {
        (StatusCode::BAD_REQUEST, INVALID_SUBMISSION.to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
