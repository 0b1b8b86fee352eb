use shipkit_domain::status::FeatureStatus;

use crate::domain::repository::FeatureRequestRepository;
use crate::domain::types::{FeatureRequest, NewFeatureRequest, Vote};
use crate::error::{AppServiceError, StoreError};

// ── CreateFeatureRequest ─────────────────────────────────────────────────────

pub struct CreateFeatureRequestInput {
    pub title: String,
    pub description: String,
}

pub struct CreateFeatureRequestUseCase<R: FeatureRequestRepository> {
    pub repo: R,
}

impl<R: FeatureRequestRepository> CreateFeatureRequestUseCase<R> {
    pub async fn execute(
        &self,
        user_id: &str,
        input: CreateFeatureRequestInput,
    ) -> Result<FeatureRequest, AppServiceError> {
        let title = input.title.trim();
        let description = input.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(AppServiceError::MissingData);
        }
        self.repo
            .create(NewFeatureRequest {
                title: title.to_owned(),
                description: description.to_owned(),
                status: FeatureStatus::Pending,
                user_id: user_id.to_owned(),
            })
            .await
            .map_err(|e| AppServiceError::on_missing_reference(e, AppServiceError::UserNotFound))
    }
}

// ── ListFeatureRequests ──────────────────────────────────────────────────────

pub struct ListFeatureRequestsUseCase<R: FeatureRequestRepository> {
    pub repo: R,
}

impl<R: FeatureRequestRepository> ListFeatureRequestsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<FeatureRequest>, AppServiceError> {
        Ok(self.repo.list_by_upvotes().await?)
    }
}

// ── Vote ─────────────────────────────────────────────────────────────────────

pub struct VoteUseCase<R: FeatureRequestRepository> {
    pub repo: R,
}

impl<R: FeatureRequestRepository> VoteUseCase<R> {
    pub async fn execute(&self, user_id: &str, request_id: &str) -> Result<Vote, AppServiceError> {
        if self.repo.find_by_id(request_id).await?.is_none() {
            return Err(AppServiceError::FeatureRequestNotFound);
        }
        self.repo
            .add_vote(user_id, request_id)
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => AppServiceError::AlreadyVoted,
                // the request exists, so the dangling key is the voter
                StoreError::MissingReference(_) => AppServiceError::UserNotFound,
                other => other.into(),
            })
    }
}

// ── Unvote ───────────────────────────────────────────────────────────────────

pub struct UnvoteUseCase<R: FeatureRequestRepository> {
    pub repo: R,
}

impl<R: FeatureRequestRepository> UnvoteUseCase<R> {
    pub async fn execute(&self, user_id: &str, request_id: &str) -> Result<(), AppServiceError> {
        if self.repo.find_by_id(request_id).await?.is_none() {
            return Err(AppServiceError::FeatureRequestNotFound);
        }
        if !self.repo.remove_vote(user_id, request_id).await? {
            return Err(AppServiceError::VoteNotFound);
        }
        Ok(())
    }
}
