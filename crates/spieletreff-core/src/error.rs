//! Error types for `spieletreff-core`.

use thiserror::Error;

use crate::submission::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid submission: {0}")]
  Validation(#[from] ValidationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
