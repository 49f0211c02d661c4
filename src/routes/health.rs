//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.
//! Used by Kubernetes, ECS, systemd, and load balancers to verify the service is alive.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Health check handler.
///
/// This is a liveness probe - it only checks that the process can respond to HTTP.
/// Takes no state, so a missing or unreadable secret never fails it.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}
