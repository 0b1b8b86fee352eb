use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Handler for `GET /healthz`: process liveness, never touches the database.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Body of the database-backed health check.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl HealthReport {
    pub fn healthy(version: &'static str) -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now(),
            version: Some(version),
            database: Some("connected"),
            error: None,
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            status: "unhealthy",
            timestamp: Utc::now(),
            version: None,
            database: None,
            error: Some("Database connection failed"),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if self.error.is_none() {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
