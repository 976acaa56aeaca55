//! spieletreff-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus
//! `SPIELETREFF_*` environment variables, loads the registration data from
//! flat JSON files, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use spieletreff_core::registry::Registry;
use spieletreff_server::{ServerConfig, shutdown_signal};
use spieletreff_store_json::JsonFileStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Spieletreff registration server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let submissions_path = server_cfg.submissions_path();
  let stats_path = server_cfg.stats_path();
  let store = JsonFileStore::open(&submissions_path, &stats_path)
    .await
    .with_context(|| format!("failed to prepare data files at {submissions_path:?}"))?;

  let registry = Arc::new(Registry::open(store).await);
  let app = spieletreff_server::app(registry);
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!(
    submissions = %submissions_path.display(),
    stats = %stats_path.display(),
    "Listening on http://{address}"
  );

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}
