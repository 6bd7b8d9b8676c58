//! Health, readiness and metrics handlers

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::worker::{MetricsSnapshot, WorkerState, SERVICE_NAME};

/// Body of /health and /ready
#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

impl ProbeResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            service: SERVICE_NAME,
            timestamp: timestamp(),
        }
    }
}

/// ISO-8601 UTC timestamp for probe responses
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub async fn health() -> Json<ProbeResponse> {
    Json(ProbeResponse::new("healthy"))
}

pub async fn ready(State(state): State<Arc<WorkerState>>) -> (StatusCode, Json<ProbeResponse>) {
    if state.is_ready() {
        (StatusCode::OK, Json(ProbeResponse::new("ready")))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ProbeResponse::new("not ready")),
        )
    }
}

pub async fn metrics(State(state): State<Arc<WorkerState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics())
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "not found",
            "path": uri.path(),
        })),
    )
}
