//! HTTP server exposing health, readiness and metrics
//!
//! Runs next to the worker loop and shares only `WorkerState` with it.
//! Handlers read atomics and never wait on the loop.

pub mod routes;

use crate::error::{Result, WorkerError};
use crate::worker::WorkerState;
use axum::{routing::get, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Build the router serving /health, /ready and /metrics
pub fn router(state: Arc<WorkerState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/ready", get(routes::ready))
        .route("/metrics", get(routes::metrics))
        .fallback(routes::not_found)
        .with_state(state)
}

/// Bind the listener for the health/metrics server
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| WorkerError::BindError {
            addr: addr.to_string(),
            source,
        })
}

/// Serve until `shutdown` completes
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: Arc<WorkerState>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Health endpoints available on {}", addr);
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Health server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(app: Router, path: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn state_with(config: ServiceConfig) -> Arc<WorkerState> {
        Arc::new(WorkerState::new(&config))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router(state_with(ServiceConfig::default()));
        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "worker-service");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_ready_endpoint() {
        let app = router(state_with(ServiceConfig::default()));
        let (status, body) = get_json(app, "/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["service"], "worker-service");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_not_ready_returns_503() {
        let state = Arc::new(WorkerState::not_ready(&ServiceConfig::default()));
        let (status, body) = get_json(router(state), "/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let state = state_with(ServiceConfig {
            environment: "staging".to_string(),
            job_interval_secs: 1,
            beta_enabled: true,
            ..ServiceConfig::default()
        });
        state.record_job_completed();
        state.record_job_completed();

        let (status, body) = get_json(router(Arc::clone(&state)), "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "worker-service");
        assert_eq!(body["environment"], "staging");
        assert_eq!(body["jobs_processed"], 2);
        assert_eq!(body["job_interval"], 1);
        assert_eq!(body["beta_enabled"], true);
        assert!(body["uptime_seconds"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_metrics_reads_are_stable_without_jobs() {
        let state = state_with(ServiceConfig::default());
        state.record_job_completed();

        let (_, first) = get_json(router(Arc::clone(&state)), "/metrics").await;
        let (_, second) = get_json(router(Arc::clone(&state)), "/metrics").await;

        assert_eq!(first["jobs_processed"], second["jobs_processed"]);
        assert_eq!(state.jobs_processed(), 1);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = state_with(ServiceConfig::default());
        let (status, body) = get_json(router(Arc::clone(&state)), "/jobs").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["path"], "/jobs");
        assert!(state.is_running());
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let response = router(state_with(ServiceConfig::default()))
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
