use shipkit_domain::email::parse_email;

use crate::domain::repository::WaitlistRepository;
use crate::domain::types::{NewWaitlistEntry, WaitlistEntry};
use crate::error::AppServiceError;

/// Source recorded for signups that do not name one.
pub const DEFAULT_SOURCE: &str = "website";

// ── JoinWaitlist ─────────────────────────────────────────────────────────────

pub struct JoinWaitlistInput {
    pub email: String,
    pub source: Option<String>,
    pub referred_by: Option<String>,
}

pub struct JoinWaitlistUseCase<R: WaitlistRepository> {
    pub repo: R,
}

impl<R: WaitlistRepository> JoinWaitlistUseCase<R> {
    /// Insert straight away; the unique index on `email` rejects repeats.
    pub async fn execute(&self, input: JoinWaitlistInput) -> Result<WaitlistEntry, AppServiceError> {
        let email = parse_email(&input.email).map_err(|_| AppServiceError::InvalidEmail)?;
        let source = input
            .source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_owned());
        self.repo
            .add(NewWaitlistEntry {
                email,
                source: Some(source),
                referred_by: input.referred_by,
            })
            .await
            .map_err(|e| AppServiceError::on_duplicate(e, AppServiceError::AlreadyOnWaitlist))
    }
}
