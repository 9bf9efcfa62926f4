//! Health endpoints for the payments backend
//!
//! `/health` answers as soon as the process is up; `/health/ready` also
//! round-trips the payments database, since every payment operation needs it.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: &'static str,
    pub version: &'static str,
}

fn health_response(status: &str) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        service: "courtbook-api",
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(health_response("healthy"))
}

/// Readiness check; fails with 503 while the payments database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    sqlx::query("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(Json(health_response("ready")))
}
