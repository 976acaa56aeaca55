//! Handlers for the derived statistics endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/game-stats` | Persisted [`PopularityStats`] |
//! | `GET`  | `/game-stats/top` | `?limit=n` (default 3) most popular items |
//! | `GET`  | `/wishlist-stats` | Normalised wish-list tally |
//! | `GET`  | `/summary` | Attendance head counts |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use spieletreff_core::{
  registry::Registry,
  stats::{AttendanceSummary, PopularityStats, RankedItem, WishlistEntry},
  store::RegistrationBackend,
};

use crate::error::ApiError;

/// Number of items the portal highlights as popular.
pub const DEFAULT_TOP_LIMIT: usize = 3;

/// `GET /game-stats`
pub async fn game_stats<B>(
  State(registry): State<Arc<Registry<B>>>,
) -> Json<PopularityStats>
where
  B: RegistrationBackend,
{
  Json(registry.load_stats().await)
}

#[derive(Debug, Deserialize)]
pub struct TopParams {
  pub limit: Option<usize>,
}

/// `GET /game-stats/top[?limit=n]`
pub async fn top<B>(
  State(registry): State<Arc<Registry<B>>>,
  params: Result<Query<TopParams>, QueryRejection>,
) -> Result<Json<Vec<RankedItem>>, ApiError>
where
  B: RegistrationBackend,
{
  let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let limit = params.limit.unwrap_or(DEFAULT_TOP_LIMIT);
  Ok(Json(registry.load_stats().await.top(limit)))
}

/// `GET /wishlist-stats`
pub async fn wishlist<B>(
  State(registry): State<Arc<Registry<B>>>,
) -> Json<Vec<WishlistEntry>>
where
  B: RegistrationBackend,
{
  Json(registry.wishlist().await)
}

/// `GET /summary`
pub async fn summary<B>(
  State(registry): State<Arc<Registry<B>>>,
) -> Json<AttendanceSummary>
where
  B: RegistrationBackend,
{
  Json(registry.summary().await)
}
