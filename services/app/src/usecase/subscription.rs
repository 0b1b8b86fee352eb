use crate::domain::repository::SubscriptionRepository;
use crate::domain::types::{Subscription, SubscriptionSnapshot};
use crate::error::AppServiceError;

// ── GetSubscription ──────────────────────────────────────────────────────────

pub struct GetSubscriptionUseCase<R: SubscriptionRepository> {
    pub repo: R,
}

impl<R: SubscriptionRepository> GetSubscriptionUseCase<R> {
    pub async fn execute(&self, user_id: &str) -> Result<Subscription, AppServiceError> {
        self.repo
            .latest_for_user(user_id)
            .await?
            .ok_or(AppServiceError::SubscriptionNotFound)
    }
}

// ── SyncSubscription ─────────────────────────────────────────────────────────

pub struct SyncSubscriptionUseCase<R: SubscriptionRepository> {
    pub repo: R,
}

impl<R: SubscriptionRepository> SyncSubscriptionUseCase<R> {
    pub async fn execute(
        &self,
        snapshot: SubscriptionSnapshot,
    ) -> Result<Subscription, AppServiceError> {
        if snapshot.stripe_subscription_id.trim().is_empty() {
            return Err(AppServiceError::MissingData);
        }
        let subscription = self
            .repo
            .upsert_by_stripe_id(snapshot)
            .await
            .map_err(|e| AppServiceError::on_missing_reference(e, AppServiceError::UserNotFound))?;
        tracing::info!(
            user_id = %subscription.user_id,
            status = %subscription.status,
            "subscription synced"
        );
        Ok(subscription)
    }
}
