use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set,
    ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
    sea_query::{Expr, OnConflict},
};

use shipkit_domain::status::{FeatureStatus, SubscriptionStatus};
use shipkit_schema::{
    account, feature_request, metric, session, subscription, user, vote, waitlist,
};

use crate::domain::repository::{
    AccountRepository, FeatureRequestRepository, MetricRepository, SessionRepository,
    SubscriptionRepository, UserRepository, WaitlistRepository,
};
use crate::domain::types::{
    Account, FeatureRequest, Metric, NewAccount, NewFeatureRequest, NewMetric, NewSession,
    NewUser, NewWaitlistEntry, Session, Subscription, SubscriptionSnapshot, User, Vote,
    WaitlistEntry,
};
use crate::error::StoreError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, new: NewUser) -> Result<User, StoreError> {
        let mut am = user::ActiveModel {
            email: Set(new.email),
            email_verified: Set(new.email_verified),
            name: Set(new.name),
            image: Set(new.image),
            ..user::ActiveModel::new()
        };
        if let Some(id) = new.id {
            am.id = Set(id);
        }
        let model = am.insert(&self.db).await?;
        Ok(user_from_model(model))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let model = user::Entity::find_by_id(id.to_owned()).one(&self.db).await?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(user_from_model))
    }

    async fn replace(&self, current: &User) -> Result<User, StoreError> {
        let model = user::ActiveModel {
            id: Unchanged(current.id.clone()),
            email: Set(current.email.clone()),
            email_verified: Set(current.email_verified),
            name: Set(current.name.clone()),
            image: Set(current.image.clone()),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        }
        .update(&self.db)
        .await?;
        Ok(user_from_model(model))
    }

    /// The cascade drops the user's votes, so the counters they fed are
    /// decremented in the same transaction.
    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let txn = self.db.begin().await?;
        let voted: Vec<String> = vote::Entity::find()
            .filter(vote::Column::UserId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|v| v.request_id)
            .collect();
        if !voted.is_empty() {
            feature_request::Entity::update_many()
                .col_expr(
                    feature_request::Column::Upvotes,
                    Expr::col(feature_request::Column::Upvotes).sub(1),
                )
                .col_expr(feature_request::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(feature_request::Column::Id.is_in(voted))
                .filter(feature_request::Column::Upvotes.gt(0))
                .exec(&txn)
                .await?;
        }
        let result = user::Entity::delete_by_id(id.to_owned())
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }
        txn.commit().await?;
        Ok(true)
    }
}

fn user_from_model(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        email_verified: model.email_verified,
        name: model.name,
        image: model.image,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, new: NewSession) -> Result<Session, StoreError> {
        let model = session::ActiveModel {
            user_id: Set(new.user_id),
            expires_at: Set(new.expires_at),
            ..session::ActiveModel::new()
        }
        .insert(&self.db)
        .await?;
        Ok(session_from_model(model))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Session>, StoreError> {
        let models = session::Entity::find()
            .filter(session::Column::UserId.eq(user_id))
            .order_by_asc(session::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(session_from_model).collect())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = session::Entity::delete_many()
            .filter(session::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

fn session_from_model(model: session::Model) -> Session {
    Session {
        id: model.id,
        user_id: model.user_id,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn link(&self, new: NewAccount) -> Result<Account, StoreError> {
        let model = account::ActiveModel {
            user_id: Set(new.user_id),
            account_id: Set(new.account_id),
            provider_id: Set(new.provider_id),
            access_token: Set(new.access_token),
            refresh_token: Set(new.refresh_token),
            expires_at: Set(new.expires_at),
            ..account::ActiveModel::new()
        }
        .insert(&self.db)
        .await?;
        Ok(account_from_model(model))
    }

    async fn find_by_provider(
        &self,
        provider_id: &str,
        account_id: &str,
    ) -> Result<Option<Account>, StoreError> {
        let model = account::Entity::find()
            .filter(account::Column::ProviderId.eq(provider_id))
            .filter(account::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await?;
        Ok(model.map(account_from_model))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Account>, StoreError> {
        let models = account::Entity::find()
            .filter(account::Column::UserId.eq(user_id))
            .order_by_asc(account::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(account_from_model).collect())
    }
}

fn account_from_model(model: account::Model) -> Account {
    Account {
        id: model.id,
        user_id: model.user_id,
        account_id: model.account_id,
        provider_id: model.provider_id,
        access_token: model.access_token,
        refresh_token: model.refresh_token,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Waitlist repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbWaitlistRepository {
    pub db: DatabaseConnection,
}

impl WaitlistRepository for DbWaitlistRepository {
    async fn add(&self, new: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError> {
        let model = waitlist::ActiveModel {
            email: Set(new.email),
            source: Set(new.source),
            referred_by: Set(new.referred_by),
            ..waitlist::ActiveModel::new()
        }
        .insert(&self.db)
        .await?;
        Ok(waitlist_from_model(model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>, StoreError> {
        let model = waitlist::Entity::find()
            .filter(waitlist::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(waitlist_from_model))
    }

    async fn list(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        let models = waitlist::Entity::find()
            .order_by_asc(waitlist::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(waitlist_from_model).collect())
    }
}

fn waitlist_from_model(model: waitlist::Model) -> WaitlistEntry {
    WaitlistEntry {
        id: model.id,
        email: model.email,
        source: model.source,
        referred_by: model.referred_by,
        notified: model.notified,
        created_at: model.created_at,
    }
}

// ── Feature request repository ───────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFeatureRequestRepository {
    pub db: DatabaseConnection,
}

impl FeatureRequestRepository for DbFeatureRequestRepository {
    async fn create(&self, new: NewFeatureRequest) -> Result<FeatureRequest, StoreError> {
        let model = feature_request::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            status: Set(new.status.into()),
            user_id: Set(new.user_id),
            ..feature_request::ActiveModel::new()
        }
        .insert(&self.db)
        .await?;
        Ok(feature_request_from_model(model))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<FeatureRequest>, StoreError> {
        let model = feature_request::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?;
        Ok(model.map(feature_request_from_model))
    }

    async fn list_by_upvotes(&self) -> Result<Vec<FeatureRequest>, StoreError> {
        let models = feature_request::Entity::find()
            .order_by_desc(feature_request::Column::Upvotes)
            .order_by_asc(feature_request::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(feature_request_from_model).collect())
    }

    async fn add_vote(&self, user_id: &str, request_id: &str) -> Result<Vote, StoreError> {
        let txn = self.db.begin().await?;
        let model = vote::ActiveModel {
            user_id: Set(user_id.to_owned()),
            request_id: Set(request_id.to_owned()),
            ..vote::ActiveModel::new()
        }
        .insert(&txn)
        .await?;
        feature_request::Entity::update_many()
            .col_expr(
                feature_request::Column::Upvotes,
                Expr::col(feature_request::Column::Upvotes).add(1),
            )
            .col_expr(feature_request::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(feature_request::Column::Id.eq(request_id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(Vote {
            id: model.id,
            user_id: model.user_id,
            request_id: model.request_id,
            created_at: model.created_at,
        })
    }

    async fn remove_vote(&self, user_id: &str, request_id: &str) -> Result<bool, StoreError> {
        let txn = self.db.begin().await?;
        let deleted = vote::Entity::delete_many()
            .filter(vote::Column::UserId.eq(user_id))
            .filter(vote::Column::RequestId.eq(request_id))
            .exec(&txn)
            .await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }
        feature_request::Entity::update_many()
            .col_expr(
                feature_request::Column::Upvotes,
                Expr::col(feature_request::Column::Upvotes).sub(1),
            )
            .col_expr(feature_request::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(feature_request::Column::Id.eq(request_id))
            .filter(feature_request::Column::Upvotes.gt(0))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(true)
    }
}

fn feature_request_from_model(model: feature_request::Model) -> FeatureRequest {
    FeatureRequest {
        id: model.id,
        title: model.title,
        description: model.description,
        status: FeatureStatus::from(model.status),
        upvotes: model.upvotes,
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Metric repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMetricRepository {
    pub db: DatabaseConnection,
}

impl MetricRepository for DbMetricRepository {
    async fn record(&self, new: NewMetric) -> Result<Metric, StoreError> {
        let model = metric::ActiveModel {
            name: Set(new.name),
            value: Set(new.value),
            tags: Set(new.tags),
            user_id: Set(new.user_id),
            ..metric::ActiveModel::new()
        }
        .insert(&self.db)
        .await?;
        Ok(metric_from_model(model))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Metric>, StoreError> {
        let model = metric::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?;
        Ok(model.map(metric_from_model))
    }
}

fn metric_from_model(model: metric::Model) -> Metric {
    Metric {
        id: model.id,
        name: model.name,
        value: model.value,
        tags: model.tags,
        user_id: model.user_id,
        timestamp: model.timestamp,
    }
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn upsert_by_stripe_id(
        &self,
        snapshot: SubscriptionSnapshot,
    ) -> Result<Subscription, StoreError> {
        let stripe_id = snapshot.stripe_subscription_id.clone();
        let am = subscription::ActiveModel {
            user_id: Set(snapshot.user_id),
            stripe_customer_id: Set(snapshot.stripe_customer_id),
            stripe_subscription_id: Set(snapshot.stripe_subscription_id),
            status: Set(snapshot.status.into()),
            price_id: Set(snapshot.price_id),
            current_period_end: Set(snapshot.current_period_end),
            cancel_at_period_end: Set(snapshot.cancel_at_period_end),
            ..subscription::ActiveModel::new()
        };
        subscription::Entity::insert(am)
            .on_conflict(
                OnConflict::column(subscription::Column::StripeSubscriptionId)
                    .update_columns([
                        subscription::Column::UserId,
                        subscription::Column::StripeCustomerId,
                        subscription::Column::Status,
                        subscription::Column::PriceId,
                        subscription::Column::CurrentPeriodEnd,
                        subscription::Column::CancelAtPeriodEnd,
                        subscription::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        let model = subscription::Entity::find()
            .filter(subscription::Column::StripeSubscriptionId.eq(stripe_id.as_str()))
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::Query(DbErr::RecordNotFound(stripe_id)))?;
        Ok(subscription_from_model(model))
    }

    async fn latest_for_user(&self, user_id: &str) -> Result<Option<Subscription>, StoreError> {
        let model = subscription::Entity::find()
            .filter(subscription::Column::UserId.eq(user_id))
            .order_by_desc(subscription::Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(model.map(subscription_from_model))
    }
}

fn subscription_from_model(model: subscription::Model) -> Subscription {
    Subscription {
        id: model.id,
        user_id: model.user_id,
        stripe_customer_id: model.stripe_customer_id,
        stripe_subscription_id: model.stripe_subscription_id,
        status: SubscriptionStatus::from(model.status),
        price_id: model.price_id,
        current_period_end: model.current_period_end,
        cancel_at_period_end: model.cancel_at_period_end,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
