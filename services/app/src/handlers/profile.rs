use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

use shipkit_auth_types::session::SessionIdentity;

use crate::error::AppServiceError;
use crate::state::AppState;
use crate::usecase::account::ListAccountsUseCase;
use crate::usecase::user::{CreateUserInput, DeleteUserUseCase, SyncSessionUserUseCase};

// ── GET /api/me ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub email_verified: bool,
    pub name: Option<String>,
    pub image: Option<String>,
    /// `providerId` of every linked account.
    pub providers: Vec<String>,
    #[serde(serialize_with = "shipkit_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "shipkit_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

pub async fn get_me(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppServiceError> {
    let sync = SyncSessionUserUseCase {
        repo: state.user_repo().await?,
    };
    let user = sync
        .execute(CreateUserInput {
            id: Some(identity.user_id),
            email: identity.email,
            email_verified: identity.email_verified,
            name: identity.name,
            image: identity.image,
        })
        .await?;
    let accounts = ListAccountsUseCase {
        repo: state.account_repo().await?,
    }
    .execute(&user.id)
    .await?;
    Ok(Json(ProfileResponse {
        id: user.id,
        email: user.email,
        email_verified: user.email_verified,
        name: user.name,
        image: user.image,
        providers: accounts.into_iter().map(|a| a.provider_id).collect(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }))
}

// ── DELETE /api/me ───────────────────────────────────────────────────────────

pub async fn delete_me(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<StatusCode, AppServiceError> {
    let usecase = DeleteUserUseCase {
        repo: state.user_repo().await?,
    };
    usecase.execute(&identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
