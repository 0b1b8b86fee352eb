use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::error::AppServiceError;
use crate::infra::connection::LazyDatabase;
use crate::infra::db::{
    DbAccountRepository, DbFeatureRequestRepository, DbMetricRepository, DbSubscriptionRepository,
    DbUserRepository, DbWaitlistRepository,
};

/// Shared application state passed to every handler via axum `State`.
///
/// Holds the lazily opened database handle rather than a live connection, so
/// the router is built before `DATABASE_URL` is ever consulted.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<LazyDatabase>,
    pub version: &'static str,
}

impl AppState {
    pub fn new(db: Arc<LazyDatabase>) -> Self {
        Self {
            db,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    async fn connection(&self) -> Result<DatabaseConnection, AppServiceError> {
        Ok(self.db.connection().await?.clone())
    }

    pub async fn user_repo(&self) -> Result<DbUserRepository, AppServiceError> {
        Ok(DbUserRepository {
            db: self.connection().await?,
        })
    }

    pub async fn account_repo(&self) -> Result<DbAccountRepository, AppServiceError> {
        Ok(DbAccountRepository {
            db: self.connection().await?,
        })
    }

    pub async fn waitlist_repo(&self) -> Result<DbWaitlistRepository, AppServiceError> {
        Ok(DbWaitlistRepository {
            db: self.connection().await?,
        })
    }

    pub async fn feature_request_repo(
        &self,
    ) -> Result<DbFeatureRequestRepository, AppServiceError> {
        Ok(DbFeatureRequestRepository {
            db: self.connection().await?,
        })
    }

    pub async fn metric_repo(&self) -> Result<DbMetricRepository, AppServiceError> {
        Ok(DbMetricRepository {
            db: self.connection().await?,
        })
    }

    pub async fn subscription_repo(&self) -> Result<DbSubscriptionRepository, AppServiceError> {
        Ok(DbSubscriptionRepository {
            db: self.connection().await?,
        })
    }
}
