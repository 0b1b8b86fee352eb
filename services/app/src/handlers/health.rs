use axum::{Json, extract::State, http::StatusCode};

use shipkit_core::health::HealthReport;

use crate::state::AppState;

// ── GET /api/health ──────────────────────────────────────────────────────────

/// Probe the store and report. Opens the connection on first call, so an
/// unset `DATABASE_URL` shows up here as "unhealthy" rather than at boot.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = match state.db.ping().await {
        Ok(()) => HealthReport::healthy(state.version),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            HealthReport::unhealthy()
        }
    };
    (report.status_code(), Json(report))
}

// ── GET /readyz ──────────────────────────────────────────────────────────────

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
