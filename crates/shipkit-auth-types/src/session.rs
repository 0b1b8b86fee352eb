//! Session identity extractor.
//!
//! The auth provider resolves the session cookie upstream and forwards the
//! session user as `x-session-*` headers. Handlers only ever see this shape.

use axum::extract::FromRequestParts;
use chrono::{DateTime, Utc};
use http::StatusCode;
use http::request::Parts;

pub const USER_ID_HEADER: &str = "x-session-user-id";
pub const EMAIL_HEADER: &str = "x-session-user-email";
pub const NAME_HEADER: &str = "x-session-user-name";
pub const IMAGE_HEADER: &str = "x-session-user-image";
pub const EMAIL_VERIFIED_HEADER: &str = "x-session-email-verified";
pub const EXPIRES_AT_HEADER: &str = "x-session-expires-at";

/// Authenticated session user.
///
/// Returns 401 if the user id or email header is absent, or if
/// `x-session-expires-at` is present but malformed or already in the past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub email_verified: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn parse_identity(parts: &Parts, now: DateTime<Utc>) -> Result<SessionIdentity, StatusCode> {
    let user_id = header(parts, USER_ID_HEADER).ok_or(StatusCode::UNAUTHORIZED)?;
    let email = header(parts, EMAIL_HEADER).ok_or(StatusCode::UNAUTHORIZED)?;
    let expires_at = match header(parts, EXPIRES_AT_HEADER) {
        Some(raw) => Some(
            DateTime::parse_from_rfc3339(&raw)
                .map_err(|_| StatusCode::UNAUTHORIZED)?
                .with_timezone(&Utc),
        ),
        None => None,
    };
    if expires_at.is_some_and(|at| at <= now) {
        tracing::debug!(user_id = %user_id, "rejecting expired session");
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(SessionIdentity {
        user_id,
        email,
        name: header(parts, NAME_HEADER),
        image: header(parts, IMAGE_HEADER),
        email_verified: header(parts, EMAIL_VERIFIED_HEADER).as_deref() == Some("true"),
        expires_at,
    })
}

impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parse_identity(parts, Utc::now());
        async move { identity }
    }
}
