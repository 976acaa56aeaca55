//! JSON REST API for the Spieletreff registration service.
//!
//! Exposes an axum [`Router`] backed by a [`Registry`] over any
//! [`RegistrationBackend`]. CORS, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", spieletreff_api::api_router(registry.clone()))
//! ```

pub mod error;
pub mod stats;
pub mod submissions;

use std::sync::Arc;

use axum::{Router, routing::get};
use spieletreff_core::{registry::Registry, store::RegistrationBackend};

pub use error::ApiError;

/// Build a fully-materialised API router for `registry`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<B>(registry: Arc<Registry<B>>) -> Router<()>
where
  B: RegistrationBackend + 'static,
{
  Router::new()
    // Submissions
    .route(
      "/submissions",
      get(submissions::list::<B>).post(submissions::create::<B>),
    )
    .route("/submissions/{id}", get(submissions::get_one::<B>))
    // Statistics
    .route("/game-stats", get(stats::game_stats::<B>))
    .route("/game-stats/top", get(stats::top::<B>))
    .route("/wishlist-stats", get(stats::wishlist::<B>))
    .route("/summary", get(stats::summary::<B>))
    .with_state(registry)
}

// ─── Integration tests ────────────────────────────────────────────────────────
