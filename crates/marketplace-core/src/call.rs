//! Call status state machine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Status of a customer/agent call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
pub enum CallStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Scheduled => "scheduled",
            CallStatus::Ongoing => "ongoing",
            CallStatus::Completed => "completed",
            CallStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CallStatus::Completed | CallStatus::Cancelled)
    }

    /// scheduled -> ongoing -> completed; scheduled or ongoing -> cancelled.
    pub fn can_transition_to(&self, next: CallStatus) -> bool {
        use CallStatus::*;
        matches!(
            (self, next),
            (Scheduled, Ongoing) | (Scheduled, Cancelled) | (Ongoing, Completed) | (Ongoing, Cancelled)
        )
    }

    pub fn transition(self, next: CallStatus) -> Result<CallStatus, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidCallTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(CallStatus::Scheduled),
            "ongoing" => Ok(CallStatus::Ongoing),
            "completed" => Ok(CallStatus::Completed),
            "cancelled" => Ok(CallStatus::Cancelled),
            other => Err(DomainError::UnknownValue {
                kind: "call status",
                value: other.to_string(),
            }),
        }
    }
}

/// How a customer wants to reach an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRequest {
    /// Call right now.
    Immediate,
    /// Call at a later time.
    Scheduled(DateTime<Utc>),
}

impl ContactRequest {
    pub fn from_schedule(scheduled_at: Option<DateTime<Utc>>) -> Self {
        match scheduled_at {
            Some(at) => ContactRequest::Scheduled(at),
            None => ContactRequest::Immediate,
        }
    }

    /// Status a new call starts in.
    pub fn initial_status(&self, now: DateTime<Utc>) -> Result<CallStatus, DomainError> {
        match self {
            ContactRequest::Immediate => Ok(CallStatus::Ongoing),
            ContactRequest::Scheduled(at) if *at <= now => Err(DomainError::ScheduleInPast),
            ContactRequest::Scheduled(_) => Ok(CallStatus::Scheduled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_legal_transitions() {
        use CallStatus::*;

        assert_eq!(Scheduled.transition(Ongoing), Ok(Ongoing));
        assert_eq!(Ongoing.transition(Completed), Ok(Completed));
        assert_eq!(Scheduled.transition(Cancelled), Ok(Cancelled));
        assert_eq!(Ongoing.transition(Cancelled), Ok(Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        use CallStatus::*;

        for (from, to) in [
            (Scheduled, Completed),
            (Completed, Ongoing),
            (Cancelled, Scheduled),
            (Completed, Cancelled),
            (Ongoing, Scheduled),
            (Ongoing, Ongoing),
        ] {
            assert_eq!(
                from.transition(to),
                Err(DomainError::InvalidCallTransition { from, to })
            );
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(CallStatus::Completed.is_terminal());
        assert!(CallStatus::Cancelled.is_terminal());
        assert!(!CallStatus::Scheduled.is_terminal());
    }

    #[test]
    fn test_initial_status() {
        let now = Utc::now();
        assert_eq!(
            ContactRequest::Immediate.initial_status(now),
            Ok(CallStatus::Ongoing)
        );
        assert_eq!(
            ContactRequest::Scheduled(now + Duration::hours(2)).initial_status(now),
            Ok(CallStatus::Scheduled)
        );
        assert_eq!(
            ContactRequest::Scheduled(now - Duration::minutes(1)).initial_status(now),
            Err(DomainError::ScheduleInPast)
        );
    }
}
