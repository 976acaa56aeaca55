//! The `RegistrationBackend` trait.
//!
//! Implemented by durable storage backends (e.g. `spieletreff-store-json`).
//! The [`Registry`](crate::registry::Registry) depends on this abstraction,
//! never on a concrete file layout, so a database can replace the flat files
//! without changing the submission contract.

use std::future::Future;

use crate::{stats::PopularityStats, submission::Submission};

/// Durable storage for the submission list and its derived statistics.
///
/// Both documents are written whole; backends never merge or append.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RegistrationBackend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the stored submission list. `None` means nothing has been stored
  /// yet.
  fn load_submissions(
    &self,
  ) -> impl Future<Output = Result<Option<Vec<Submission>>, Self::Error>> + Send + '_;

  /// Replace the stored submission list with `submissions`.
  fn save_submissions<'a>(
    &'a self,
    submissions: &'a [Submission],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Read the stored statistics. `None` means nothing has been stored yet.
  fn load_stats(
    &self,
  ) -> impl Future<Output = Result<Option<PopularityStats>, Self::Error>> + Send + '_;

  /// Replace the stored statistics with `stats`.
  fn save_stats<'a>(
    &'a self,
    stats: &'a PopularityStats,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
