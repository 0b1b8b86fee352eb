use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};

use crate::error::AppServiceError;

// ── GET /api/check-env ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckEnvQuery {
    pub var: Option<String>,
}

#[derive(Serialize)]
pub struct CheckEnvResponse {
    pub exists: bool,
}

/// Setup checklist helper: reports whether a variable is set and non-empty.
/// The value itself is never returned.
pub async fn check_env(
    Query(query): Query<CheckEnvQuery>,
) -> Result<Json<CheckEnvResponse>, AppServiceError> {
    let name = query
        .var
        .filter(|v| !v.is_empty())
        .ok_or(AppServiceError::MissingData)?;
    let exists = std::env::var(&name).is_ok_and(|v| !v.is_empty());
    Ok(Json(CheckEnvResponse { exists }))
}
