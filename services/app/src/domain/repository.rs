#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{
    Account, FeatureRequest, Metric, NewAccount, NewFeatureRequest, NewMetric, NewSession,
    NewUser, NewWaitlistEntry, Session, Subscription, SubscriptionSnapshot, User, Vote,
    WaitlistEntry,
};
use crate::error::StoreError;

/// Repository for user rows.
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replace every mutable column of an existing user and bump `updated_at`.
    /// `created_at` is never touched.
    async fn replace(&self, user: &User) -> Result<User, StoreError>;

    /// Delete a user and, through the storage engine, everything it owns.
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Repository for auth-provider sessions.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: NewSession) -> Result<Session, StoreError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Session>, StoreError>;

    /// Delete sessions that expired at or before `now`. Returns the count.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;
}

/// Repository for linked provider accounts.
pub trait AccountRepository: Send + Sync {
    async fn link(&self, account: NewAccount) -> Result<Account, StoreError>;
    async fn find_by_provider(
        &self,
        provider_id: &str,
        account_id: &str,
    ) -> Result<Option<Account>, StoreError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Account>, StoreError>;
}

/// Repository for pre-launch signups.
pub trait WaitlistRepository: Send + Sync {
    /// Insert an entry. A taken email surfaces as [`StoreError::Duplicate`].
    async fn add(&self, entry: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>, StoreError>;
    async fn list(&self) -> Result<Vec<WaitlistEntry>, StoreError>;
}

/// Repository for feature requests and their votes.
pub trait FeatureRequestRepository: Send + Sync {
    async fn create(&self, request: NewFeatureRequest) -> Result<FeatureRequest, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<FeatureRequest>, StoreError>;

    /// All requests, most upvoted first.
    async fn list_by_upvotes(&self) -> Result<Vec<FeatureRequest>, StoreError>;

    /// Insert a vote and increment `upvotes` atomically.
    async fn add_vote(&self, user_id: &str, request_id: &str) -> Result<Vote, StoreError>;

    /// Delete a vote and decrement `upvotes` atomically. Returns `false` if the
    /// user had not voted.
    async fn remove_vote(&self, user_id: &str, request_id: &str) -> Result<bool, StoreError>;
}

/// Repository for recorded metrics.
pub trait MetricRepository: Send + Sync {
    async fn record(&self, metric: NewMetric) -> Result<Metric, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Metric>, StoreError>;
}

/// Repository for billing subscriptions.
pub trait SubscriptionRepository: Send + Sync {
    /// Insert or fully replace the row with the same `stripe_subscription_id`.
    async fn upsert_by_stripe_id(
        &self,
        snapshot: SubscriptionSnapshot,
    ) -> Result<Subscription, StoreError>;

    /// Most recently created subscription of a user.
    async fn latest_for_user(&self, user_id: &str) -> Result<Option<Subscription>, StoreError>;
}
