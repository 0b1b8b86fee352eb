//! Mock session helpers for handler tests.
//!
//! In production the auth provider injects the `x-session-*` headers. Tests
//! build the same headers directly so no provider is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use chrono::{DateTime, Duration, Utc};

use shipkit_auth_types::session::{
    EMAIL_HEADER, EMAIL_VERIFIED_HEADER, EXPIRES_AT_HEADER, IMAGE_HEADER, NAME_HEADER,
    USER_ID_HEADER,
};

/// Configurable session user injected into test requests.
pub struct MockSession {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub email_verified: bool,
    pub expires_at: DateTime<Utc>,
}

impl MockSession {
    /// Verified session for `user_id` / `email`, valid for one hour.
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            name: None,
            image: None,
            email_verified: true,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn expired(mut self) -> Self {
        self.expires_at = Utc::now() - Duration::minutes(5);
        self
    }

    /// Return headers as if the auth provider injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let mut put = |name: &'static str, value: &str| {
            map.insert(
                HeaderName::from_static(name),
                HeaderValue::from_str(value).unwrap(),
            );
        };
        put(USER_ID_HEADER, &self.user_id);
        put(EMAIL_HEADER, &self.email);
        if let Some(name) = &self.name {
            put(NAME_HEADER, name);
        }
        if let Some(image) = &self.image {
            put(IMAGE_HEADER, image);
        }
        put(
            EMAIL_VERIFIED_HEADER,
            if self.email_verified { "true" } else { "false" },
        );
        put(EXPIRES_AT_HEADER, &self.expires_at.to_rfc3339());
        map
    }
}
