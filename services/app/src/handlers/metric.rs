use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::Value;

use shipkit_auth_types::session::SessionIdentity;

use crate::error::AppServiceError;
use crate::state::AppState;
use crate::usecase::metric::{RecordMetricInput, RecordMetricUseCase};

// ── POST /api/metrics ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecordMetricRequest {
    pub name: String,
    pub value: i32,
    pub tags: Option<Value>,
}

pub async fn record_metric(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Json(body): Json<RecordMetricRequest>,
) -> Result<StatusCode, AppServiceError> {
    let usecase = RecordMetricUseCase {
        repo: state.metric_repo().await?,
    };
    usecase
        .execute(
            Some(&identity.user_id),
            RecordMetricInput {
                name: body.name,
                value: body.value,
                tags: body.tags,
            },
        )
        .await?;
    Ok(StatusCode::CREATED)
}
