use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipkit_auth_types::session::SessionIdentity;
use shipkit_domain::status::FeatureStatus;

use crate::domain::types::FeatureRequest;
use crate::error::AppServiceError;
use crate::state::AppState;
use crate::usecase::feature_request::{
    CreateFeatureRequestInput, CreateFeatureRequestUseCase, ListFeatureRequestsUseCase,
    UnvoteUseCase, VoteUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequestResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: FeatureStatus,
    pub upvotes: i32,
    pub user_id: String,
    #[serde(serialize_with = "shipkit_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "shipkit_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<FeatureRequest> for FeatureRequestResponse {
    fn from(r: FeatureRequest) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            status: r.status,
            upvotes: r.upvotes,
            user_id: r.user_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// ── GET /api/feature-requests ────────────────────────────────────────────────

pub async fn list_feature_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeatureRequestResponse>>, AppServiceError> {
    let usecase = ListFeatureRequestsUseCase {
        repo: state.feature_request_repo().await?,
    };
    let requests = usecase.execute().await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

// ── POST /api/feature-requests ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateFeatureRequestRequest {
    pub title: String,
    pub description: String,
}

pub async fn create_feature_request(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateFeatureRequestRequest>,
) -> Result<(StatusCode, Json<FeatureRequestResponse>), AppServiceError> {
    let usecase = CreateFeatureRequestUseCase {
        repo: state.feature_request_repo().await?,
    };
    let request = usecase
        .execute(
            &identity.user_id,
            CreateFeatureRequestInput {
                title: body.title,
                description: body.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(request.into())))
}

// ── POST /api/feature-requests/{id}/votes ────────────────────────────────────

pub async fn vote(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<StatusCode, AppServiceError> {
    let usecase = VoteUseCase {
        repo: state.feature_request_repo().await?,
    };
    usecase.execute(&identity.user_id, &request_id).await?;
    Ok(StatusCode::CREATED)
}

// ── DELETE /api/feature-requests/{id}/votes ──────────────────────────────────

pub async fn unvote(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<StatusCode, AppServiceError> {
    let usecase = UnvoteUseCase {
        repo: state.feature_request_repo().await?,
    };
    usecase.execute(&identity.user_id, &request_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
