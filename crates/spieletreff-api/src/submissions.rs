//! Handlers for `/submissions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/submissions` | All submissions in storage order |
//! | `POST` | `/submissions` | Body: [`NewSubmission`]; returns 201 + stored submission |
//! | `GET`  | `/submissions/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use spieletreff_core::{
  registry::Registry,
  store::RegistrationBackend,
  submission::{NewSubmission, Submission},
};
use tracing::info;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /submissions`
pub async fn list<B>(
  State(registry): State<Arc<Registry<B>>>,
) -> Json<Vec<Submission>>
where
  B: RegistrationBackend,
{
  let submissions = registry.list_submissions().await;
  info!(count = submissions.len(), "returning submissions");
  Json(submissions)
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /submissions/:id`
pub async fn get_one<B>(
  State(registry): State<Arc<Registry<B>>>,
  Path(id): Path<u64>,
) -> Result<Json<Submission>, ApiError>
where
  B: RegistrationBackend,
{
  let submission = registry
    .get_submission(id)
    .await
    .ok_or_else(|| ApiError::NotFound(format!("submission {id} not found")))?;
  Ok(Json(submission))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /submissions`: create a submission, or replace the one with the same
/// e-mail address. Returns 201 + the stored [`Submission`].
///
/// Body rejections (wrong content type, malformed JSON, wrong field types)
/// are reported as invalid submissions like a missing name or e-mail.
pub async fn create<B>(
  State(registry): State<Arc<Registry<B>>>,
  body: Result<Json<NewSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  B: RegistrationBackend,
{
  let result = match body {
    Ok(Json(input)) => registry.create_or_replace(input).await.map_err(ApiError::from),
    Err(e) => Err(ApiError::InvalidSubmission(e.body_text())),
  };
  let submission =
    result.inspect_err(|e| info!(error = %e, "rejected submission"))?;
  Ok((StatusCode::CREATED, Json(submission)))
}
