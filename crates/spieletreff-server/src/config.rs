//! Server configuration, layered from a TOML file and `SPIELETREFF_*`
//! environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use spieletreff_store_json::{STATS_FILE, SUBMISSIONS_FILE};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATA_DIR: &str = "data";

/// Environment variable prefix, e.g. `SPIELETREFF_PORT=8080`.
pub const ENV_PREFIX: &str = "SPIELETREFF";

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  /// Directory holding both data files unless overridden below.
  pub data_dir:         PathBuf,
  pub submissions_path: Option<PathBuf>,
  pub stats_path:       Option<PathBuf>,
}

impl ServerConfig {
  /// Read `path` (optional) and the environment on top of the defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", DEFAULT_HOST)?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("data_dir", DEFAULT_DATA_DIR)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn submissions_path(&self) -> PathBuf {
    match &self.submissions_path {
      Some(path) => expand_tilde(path),
      None => expand_tilde(&self.data_dir).join(SUBMISSIONS_FILE),
    }
  }

  pub fn stats_path(&self) -> PathBuf {
    match &self.stats_path {
      Some(path) => expand_tilde(path),
      None => expand_tilde(&self.data_dir).join(STATS_FILE),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
