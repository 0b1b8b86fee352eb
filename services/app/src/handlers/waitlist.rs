use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::error::AppServiceError;
use crate::state::AppState;
use crate::usecase::waitlist::{JoinWaitlistInput, JoinWaitlistUseCase};

// ── POST /api/waitlist ───────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitlistRequest {
    pub email: String,
    pub source: Option<String>,
    pub referred_by: Option<String>,
}

#[derive(Serialize)]
pub struct JoinWaitlistResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn join_waitlist(
    State(state): State<AppState>,
    body: Result<Json<JoinWaitlistRequest>, JsonRejection>,
) -> Result<Json<JoinWaitlistResponse>, AppServiceError> {
    let Json(body) = body.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(_) => AppServiceError::InvalidEmail,
        _ => AppServiceError::MissingData,
    })?;
    let usecase = JoinWaitlistUseCase {
        repo: state.waitlist_repo().await?,
    };
    let entry = usecase
        .execute(JoinWaitlistInput {
            email: body.email,
            source: body.source,
            referred_by: body.referred_by,
        })
        .await?;
    tracing::info!(waitlist_id = %entry.id, "waitlist signup");
    Ok(Json(JoinWaitlistResponse {
        success: true,
        message: "Successfully added to waitlist",
    }))
}
