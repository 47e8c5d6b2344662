//! Agent standing and derived lifecycle state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::visibility::PUBLIC_LISTING;

/// Administrator review outcome stored on the agent record.
///
/// Verified and rejected are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
pub enum ReviewStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Verified => "verified",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ReviewStatus::Pending),
            "verified" => Ok(ReviewStatus::Verified),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(DomainError::UnknownValue {
                kind: "review status",
                value: other.to_string(),
            }),
        }
    }
}

/// Where an agent sits in the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Incomplete,
    PendingReview,
    Verified,
    Rejected,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Incomplete => "incomplete",
            LifecycleState::PendingReview => "pending review",
            LifecycleState::Verified => "verified",
            LifecycleState::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "incomplete" => Ok(LifecycleState::Incomplete),
            "pending" | "pending_review" => Ok(LifecycleState::PendingReview),
            "verified" => Ok(LifecycleState::Verified),
            "rejected" => Ok(LifecycleState::Rejected),
            other => Err(DomainError::UnknownValue {
                kind: "lifecycle state",
                value: other.to_string(),
            }),
        }
    }
}

/// Rejection details, present only while rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: String,
    pub at: DateTime<Utc>,
}

/// The lifecycle-relevant slice of an agent record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub profile_complete: bool,
    pub review_status: ReviewStatus,
    pub premium: bool,
    pub available: bool,
    pub rejection: Option<Rejection>,
}

impl Standing {
    pub fn verified(&self) -> bool {
        self.review_status == ReviewStatus::Verified
    }

    pub fn rejected(&self) -> bool {
        self.review_status == ReviewStatus::Rejected
    }

    /// Derive the workflow state. Rejection wins over completeness.
    pub fn lifecycle_state(&self) -> LifecycleState {
        match self.review_status {
            ReviewStatus::Rejected => LifecycleState::Rejected,
            _ if !self.profile_complete => LifecycleState::Incomplete,
            ReviewStatus::Verified => LifecycleState::Verified,
            ReviewStatus::Pending => LifecycleState::PendingReview,
        }
    }

    /// Whether the agent appears in public "find agents" results.
    pub fn is_publicly_visible(&self) -> bool {
        PUBLIC_LISTING.admits(self)
    }

    /// Whether the agent sits in the administrator's pending queue.
    pub fn is_awaiting_review(&self) -> bool {
        self.lifecycle_state() == LifecycleState::PendingReview
    }

    /// Recompute completeness after a profile save.
    ///
    /// An incomplete profile cannot stay online.
    pub fn with_profile_complete(&self, complete: bool) -> Standing {
        Standing {
            profile_complete: complete,
            available: self.available && complete,
            ..self.clone()
        }
    }
}

/// Fields that must be filled before an agent can be reviewed.
#[derive(Debug, Clone, Copy)]
pub struct RequiredFields<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub state: &'a str,
    pub city: &'a str,
    pub categories: &'a [String],
}

/// Name, phone, state, city, and at least one category must be non-blank.
pub fn is_profile_complete(fields: &RequiredFields<'_>) -> bool {
    let filled = |value: &str| !value.trim().is_empty();

    filled(fields.name)
        && filled(fields.phone)
        && filled(fields.state)
        && filled(fields.city)
        && fields.categories.iter().any(|c| filled(c))
}
