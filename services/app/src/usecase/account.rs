use crate::domain::repository::AccountRepository;
use crate::domain::types::{Account, NewAccount};
use crate::error::{AppServiceError, StoreError};

// ── LinkAccount ──────────────────────────────────────────────────────────────

pub struct LinkAccountUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> LinkAccountUseCase<R> {
    pub async fn execute(&self, input: NewAccount) -> Result<Account, AppServiceError> {
        if input.provider_id.trim().is_empty() || input.account_id.trim().is_empty() {
            return Err(AppServiceError::MissingData);
        }
        self.repo.link(input).await.map_err(|e| match e {
            StoreError::Duplicate(_) => AppServiceError::AccountAlreadyLinked,
            StoreError::MissingReference(_) => AppServiceError::UserNotFound,
            other => other.into(),
        })
    }
}

// ── ListAccounts ─────────────────────────────────────────────────────────────

pub struct ListAccountsUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> ListAccountsUseCase<R> {
    pub async fn execute(&self, user_id: &str) -> Result<Vec<Account>, AppServiceError> {
        Ok(self.repo.list_by_user(user_id).await?)
    }
}
