//! [`JsonFileStore`]: the flat-file implementation of [`RegistrationBackend`].

use std::{
  io,
  path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use spieletreff_core::{
  stats::PopularityStats,
  store::RegistrationBackend,
  submission::Submission,
};
use tracing::{debug, info};

use crate::{Error, Result};

/// File name of the submission array inside a data directory.
pub const SUBMISSIONS_FILE: &str = "submissions.json";
/// File name of the statistics object inside a data directory.
pub const STATS_FILE: &str = "gameStats.json";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A registration backend storing each document as one pretty-printed JSON
/// file.
///
/// There is no locking across processes; two instances sharing the same files
/// overwrite each other.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  submissions_path: PathBuf,
  stats_path:       PathBuf,
}

impl JsonFileStore {
  /// Use the given file paths, creating their parent directories if needed.
  /// The files themselves are created on first save.
  pub async fn open(
    submissions_path: impl Into<PathBuf>,
    stats_path: impl Into<PathBuf>,
  ) -> Result<Self> {
    let store = Self {
      submissions_path: submissions_path.into(),
      stats_path:       stats_path.into(),
    };
    create_parent(&store.submissions_path).await?;
    create_parent(&store.stats_path).await?;
    Ok(store)
  }

  /// Use [`SUBMISSIONS_FILE`] and [`STATS_FILE`] inside `dir`, creating the
  /// directory if it does not exist.
  pub async fn open_dir(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref();
    Self::open(dir.join(SUBMISSIONS_FILE), dir.join(STATS_FILE)).await
  }

  pub fn submissions_path(&self) -> &Path { &self.submissions_path }

  pub fn stats_path(&self) -> &Path { &self.stats_path }
}

// ─── RegistrationBackend impl ────────────────────────────────────────────────

impl RegistrationBackend for JsonFileStore {
  type Error = Error;

  async fn load_submissions(&self) -> Result<Option<Vec<Submission>>> {
    read_json(&self.submissions_path).await
  }

  async fn save_submissions(&self, submissions: &[Submission]) -> Result<()> {
    write_json(&self.submissions_path, submissions).await?;
    info!(
      count = submissions.len(),
      path = %self.submissions_path.display(),
      "saved submissions"
    );
    Ok(())
  }

  async fn load_stats(&self) -> Result<Option<PopularityStats>> {
    read_json(&self.stats_path).await
  }

  async fn save_stats(&self, stats: &PopularityStats) -> Result<()> {
    write_json(&self.stats_path, stats).await?;
    debug!(path = %self.stats_path.display(), "saved game statistics");
    Ok(())
  }
}

// ─── File helpers ────────────────────────────────────────────────────────────

async fn create_parent(path: &Path) -> Result<()> {
  match path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::create_dir_all(dir)
      .await
      .map_err(|source| Error::Io { path: dir.to_path_buf(), source }),
    _ => Ok(()),
  }
}

/// Read and parse `path`; a missing file is `Ok(None)`.
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
  let bytes = match tokio::fs::read(path).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(source) => {
      return Err(Error::Io { path: path.to_path_buf(), source });
    }
  };
  serde_json::from_slice(&bytes)
    .map(Some)
    .map_err(|source| Error::Json { path: path.to_path_buf(), source })
}

/// Serialise `value` and overwrite `path` with it.
async fn write_json<T>(path: &Path, value: &T) -> Result<()>
where
  T: Serialize + Sync + ?Sized,
{
  let bytes = serde_json::to_vec_pretty(value)
    .map_err(|source| Error::Json { path: path.to_path_buf(), source })?;
  tokio::fs::write(path, bytes)
    .await
    .map_err(|source| Error::Io { path: path.to_path_buf(), source })
}
