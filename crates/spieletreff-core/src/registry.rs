//! [`Registry`]: the authoritative submission store.
//!
//! The registry keeps the live submission list in memory and mirrors every
//! change to a [`RegistrationBackend`]. Storage failures never reach callers:
//! reads fall back to empty defaults and failed writes leave memory ahead of
//! disk until the next successful write.

use chrono::{SubsecRound as _, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
  Result,
  stats::{self, AttendanceSummary, PopularityStats, WishlistEntry},
  store::RegistrationBackend,
  submission::{NewSubmission, Submission, normalize_email},
};

/// In-memory submission list backed by durable storage.
///
/// Every write holds the list lock from lookup until the recomputed
/// statistics are persisted, so concurrent writers are fully serialised.
pub struct Registry<B> {
  backend:     B,
  submissions: Mutex<Vec<Submission>>,
}

impl<B: RegistrationBackend> Registry<B> {
  /// Load the stored submissions and refresh the statistics.
  ///
  /// Missing or unreadable data yields an empty registry; the failure is
  /// logged, not returned.
  pub async fn open(backend: B) -> Self {
    let submissions = match backend.load_submissions().await {
      Ok(Some(list)) => list,
      Ok(None) => {
        info!("no stored submissions, starting empty");
        Vec::new()
      }
      Err(e) => {
        error!(error = %e, "failed to load submissions, starting empty");
        Vec::new()
      }
    };
    info!(count = submissions.len(), "loaded submissions");

    let registry = Self { backend, submissions: Mutex::new(submissions) };
    {
      let submissions = registry.submissions.lock().await;
      registry.refresh_stats(&submissions).await;
    }
    registry
  }

  #[cfg(test)]
  pub(crate) fn backend(&self) -> &B { &self.backend }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// All submissions in storage order.
  pub async fn list_submissions(&self) -> Vec<Submission> {
    self.submissions.lock().await.clone()
  }

  pub async fn get_submission(&self, id: u64) -> Option<Submission> {
    self
      .submissions
      .lock()
      .await
      .iter()
      .find(|s| s.id == id)
      .cloned()
  }

  /// The persisted statistics, or empty statistics if none can be read.
  pub async fn load_stats(&self) -> PopularityStats {
    match self.backend.load_stats().await {
      Ok(Some(stats)) => stats,
      Ok(None) => PopularityStats::default(),
      Err(e) => {
        error!(error = %e, "failed to load game statistics");
        PopularityStats::default()
      }
    }
  }

  pub async fn summary(&self) -> AttendanceSummary {
    AttendanceSummary::from_submissions(&self.submissions.lock().await)
  }

  pub async fn wishlist(&self) -> Vec<WishlistEntry> {
    stats::wishlist_tally(&self.submissions.lock().await)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Store `input`, replacing any submission with the same e-mail address.
  ///
  /// A replacement keeps the original `id`; a new address gets the highest
  /// existing id plus one. The list and the recomputed statistics are
  /// persisted before returning.
  pub async fn create_or_replace(
    &self,
    input: NewSubmission,
  ) -> Result<Submission> {
    input.validate()?;
    let key = normalize_email(&input.email);

    let mut submissions = self.submissions.lock().await;
    let timestamp = Utc::now().trunc_subsecs(3);

    let stored = match submissions.iter().position(|s| s.email_key() == key) {
      Some(index) => {
        let record = Submission::from_new(submissions[index].id, timestamp, input);
        submissions[index] = record.clone();
        info!(id = record.id, "replaced submission for known email");
        record
      }
      None => {
        let id = submissions.iter().map(|s| s.id).max().map_or(1, |max| max + 1);
        let record = Submission::from_new(id, timestamp, input);
        submissions.push(record.clone());
        info!(id, "added submission");
        record
      }
    };

    if let Err(e) = self.backend.save_submissions(&submissions).await {
      warn!(error = %e, "failed to persist submissions, memory is ahead of disk");
    }
    self.refresh_stats(&submissions).await;

    Ok(stored)
  }

  /// Recompute the statistics from `submissions` and persist them.
  async fn refresh_stats(&self, submissions: &[Submission]) {
    let stats = stats::recompute(submissions);
    match self.backend.save_stats(&stats).await {
      Ok(()) => debug!(
        eligible = stats.total_eligible,
        items = stats.items.len(),
        "game statistics updated"
      ),
      Err(e) => warn!(error = %e, "failed to persist game statistics"),
    }
  }
}
