use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use shipkit_auth_types::session::SessionIdentity;
use shipkit_domain::status::SubscriptionStatus;

use crate::error::AppServiceError;
use crate::state::AppState;
use crate::usecase::subscription::GetSubscriptionUseCase;

// ── GET /api/subscription ────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub status: SubscriptionStatus,
    pub entitled: bool,
    pub price_id: String,
    #[serde(serialize_with = "shipkit_core::serde::opt_to_rfc3339_ms")]
    pub current_period_end: Option<DateTime<Utc>>,
    pub cancel_at_period_end: bool,
}

pub async fn get_subscription(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<Json<SubscriptionResponse>, AppServiceError> {
    let usecase = GetSubscriptionUseCase {
        repo: state.subscription_repo().await?,
    };
    let sub = usecase.execute(&identity.user_id).await?;
    Ok(Json(SubscriptionResponse {
        entitled: sub.status.is_entitled(),
        status: sub.status,
        price_id: sub.price_id,
        current_period_end: sub.current_period_end,
        cancel_at_period_end: sub.cancel_at_period_end,
    }))
}
