//! HTTP server wiring for the Spieletreff registration service.
//!
//! Mounts the JSON API under `/api` with request tracing and an open CORS
//! policy, so the registration form can be served from any origin.

pub mod config;

use std::{sync::Arc, time::Duration};

use axum::{
  Router,
  http::{Method, header::CONTENT_TYPE},
};
use spieletreff_core::{registry::Registry, store::RegistrationBackend};
use tokio::signal;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use tracing::{error, info};

pub use crate::config::ServerConfig;

/// Build the full application router around `registry`.
pub fn app<B>(registry: Arc<Registry<B>>) -> Router
where
  B: RegistrationBackend + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers([CONTENT_TYPE])
    .max_age(Duration::from_secs(60 * 60));

  Router::new()
    .nest("/api", spieletreff_api::api_router(registry))
    .layer(TraceLayer::new_for_http())
    .layer(cors)
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    match signal::ctrl_c().await {
      Ok(()) => info!("received Ctrl+C, shutting down"),
      Err(e) => {
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
        info!("received terminate signal, shutting down");
      }
      Err(e) => {
        error!(error = %e, "failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use spieletreff_store_json::JsonFileStore;
  use tower::ServiceExt as _;

  async fn make_app(dir: &std::path::Path) -> Router {
    let store = JsonFileStore::open_dir(dir).await.unwrap();
    app(Arc::new(Registry::open(store).await))
  }

  #[tokio::test]
  async fn cors_preflight_allows_any_origin() {
    let dir = tempfile::tempdir().unwrap();
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/api/submissions")
      .header(header::ORIGIN, "http://192.168.100.85:5173")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
      .body(Body::empty())
      .unwrap();

    let resp = make_app(dir.path()).await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let router = make_app(dir.path()).await;

    let req = Request::builder()
      .uri("/api/game-stats")
      .header(header::ORIGIN, "http://example.org")
      .body(Body::empty())
      .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );

    let req = Request::builder()
      .uri("/submissions")
      .body(Body::empty())
      .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
