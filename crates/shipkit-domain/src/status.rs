//! Status values stored as free-form text.
//!
//! Both enumerations accept any string: values outside the known set are kept
//! verbatim in an `Unknown` variant instead of failing deserialization, so rows
//! written by newer code or by an upstream provider always load.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a feature request on the public roadmap.
///
/// Wire format: kebab-case string (`pending`, `planned`, `in-progress`, `completed`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeatureStatus {
    #[default]
    Pending,
    Planned,
    InProgress,
    Completed,
    Unknown(String),
}

impl FeatureStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Planned => "planned",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for FeatureStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "pending" => Self::Pending,
            "planned" => Self::Planned,
            "in-progress" => Self::InProgress,
            "completed" => Self::Completed,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl From<String> for FeatureStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<FeatureStatus> for String {
    fn from(status: FeatureStatus) -> Self {
        match status {
            FeatureStatus::Unknown(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing provider subscription state.
///
/// Wire format: the provider's snake_case names (`active`, `past_due`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
    Trialing,
    Incomplete,
    IncompleteExpired,
    Unpaid,
    Paused,
    Unknown(String),
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Canceled => "canceled",
            Self::PastDue => "past_due",
            Self::Trialing => "trialing",
            Self::Incomplete => "incomplete",
            Self::IncompleteExpired => "incomplete_expired",
            Self::Unpaid => "unpaid",
            Self::Paused => "paused",
            Self::Unknown(raw) => raw,
        }
    }

    /// Whether the subscription currently grants access to paid features.
    pub fn is_entitled(&self) -> bool {
        matches!(self, Self::Active | Self::Trialing | Self::PastDue)
    }
}

impl From<&str> for SubscriptionStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "canceled" => Self::Canceled,
            "past_due" => Self::PastDue,
            "trialing" => Self::Trialing,
            "incomplete" => Self::Incomplete,
            "incomplete_expired" => Self::IncompleteExpired,
            "unpaid" => Self::Unpaid,
            "paused" => Self::Paused,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl From<String> for SubscriptionStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<SubscriptionStatus> for String {
    fn from(status: SubscriptionStatus) -> Self {
        match status {
            SubscriptionStatus::Unknown(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
