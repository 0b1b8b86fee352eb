use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::{DbErr, SqlErr};

/// Failure reported by the persistence layer.
///
/// Kinds are preserved end to end so callers can branch on them; nothing in
/// the store layer retries or swallows an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} environment variable is not set")]
    NotConfigured(String),
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("referenced row does not exist: {0}")]
    MissingReference(String),
    #[error("database unavailable")]
    Unavailable(#[source] DbErr),
    #[error("database error")]
    Query(#[source] DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => return Self::Duplicate(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                return Self::MissingReference(detail);
            }
            _ => {}
        }
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Unavailable(err),
            other => Self::Query(other),
        }
    }
}

/// App service error variants, rendered as `{ "kind", "message" }` JSON.
#[derive(Debug, thiserror::Error)]
pub enum AppServiceError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("missing data")]
    MissingData,
    #[error("session already expired")]
    SessionExpired,
    #[error("email already on waitlist")]
    AlreadyOnWaitlist,
    #[error("email already registered")]
    EmailTaken,
    #[error("account already linked")]
    AccountAlreadyLinked,
    #[error("already voted")]
    AlreadyVoted,
    #[error("duplicate key")]
    DuplicateKey,
    #[error("user not found")]
    UserNotFound,
    #[error("feature request not found")]
    FeatureRequestNotFound,
    #[error("vote not found")]
    VoteNotFound,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("database not configured")]
    NotConfigured,
    #[error("database unavailable")]
    DatabaseUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::MissingData => "MISSING_DATA",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::AlreadyOnWaitlist => "ALREADY_ON_WAITLIST",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::AccountAlreadyLinked => "ACCOUNT_ALREADY_LINKED",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::DuplicateKey => "DUPLICATE_KEY",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::FeatureRequestNotFound => "FEATURE_REQUEST_NOT_FOUND",
            Self::VoteNotFound => "VOTE_NOT_FOUND",
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Map a store error, turning a unique-key conflict into `duplicate`.
    pub fn on_duplicate(err: StoreError, duplicate: Self) -> Self {
        match err {
            StoreError::Duplicate(_) => duplicate,
            other => other.into(),
        }
    }

    /// Map a store error, turning a dangling foreign key into `missing`.
    pub fn on_missing_reference(err: StoreError, missing: Self) -> Self {
        match err {
            StoreError::MissingReference(_) => missing,
            other => other.into(),
        }
    }
}

impl From<StoreError> for AppServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotConfigured(var) => {
                tracing::error!(variable = %var, "database connection string not set");
                Self::NotConfigured
            }
            StoreError::Duplicate(_) => Self::DuplicateKey,
            StoreError::Unavailable(e) => {
                tracing::error!(error = %e, "database unavailable");
                Self::DatabaseUnavailable
            }
            other => Self::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidEmail
            | Self::MissingData
            | Self::SessionExpired
            | Self::AlreadyOnWaitlist
            | Self::EmailTaken
            | Self::AccountAlreadyLinked
            | Self::AlreadyVoted
            | Self::DuplicateKey => StatusCode::BAD_REQUEST,
            Self::UserNotFound
            | Self::FeatureRequestNotFound
            | Self::VoteNotFound
            | Self::SubscriptionNotFound => StatusCode::NOT_FOUND,
            Self::NotConfigured | Self::DatabaseUnavailable | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
