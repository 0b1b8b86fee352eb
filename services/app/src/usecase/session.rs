use chrono::{DateTime, Utc};

use crate::domain::repository::SessionRepository;
use crate::domain::types::{NewSession, Session};
use crate::error::AppServiceError;

// ── CreateSession ────────────────────────────────────────────────────────────

pub struct CreateSessionUseCase<R: SessionRepository> {
    pub repo: R,
}

impl<R: SessionRepository> CreateSessionUseCase<R> {
    pub async fn execute(
        &self,
        input: NewSession,
        now: DateTime<Utc>,
    ) -> Result<Session, AppServiceError> {
        if input.expires_at <= now {
            return Err(AppServiceError::SessionExpired);
        }
        self.repo
            .create(input)
            .await
            .map_err(|e| AppServiceError::on_missing_reference(e, AppServiceError::UserNotFound))
    }
}

// ── ListSessions ─────────────────────────────────────────────────────────────

pub struct ListSessionsUseCase<R: SessionRepository> {
    pub repo: R,
}

impl<R: SessionRepository> ListSessionsUseCase<R> {
    pub async fn execute(&self, user_id: &str) -> Result<Vec<Session>, AppServiceError> {
        Ok(self.repo.list_by_user(user_id).await?)
    }
}

// ── PruneSessions ────────────────────────────────────────────────────────────

pub struct PruneSessionsUseCase<R: SessionRepository> {
    pub repo: R,
}

impl<R: SessionRepository> PruneSessionsUseCase<R> {
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<u64, AppServiceError> {
        let removed = self.repo.delete_expired(now).await?;
        if removed > 0 {
            tracing::info!(removed, "pruned expired sessions");
        }
        Ok(removed)
    }
}
