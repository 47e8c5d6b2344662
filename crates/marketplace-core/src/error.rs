//! Domain error types.

use thiserror::Error;

use crate::agent::LifecycleState;
use crate::call::CallStatus;

/// Errors raised by marketplace rules before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A grant requires a complete profile.
    #[error("agent profile is incomplete")]
    ProfileIncomplete,

    /// Rejection requires a non-empty reason.
    #[error("a rejection reason is required")]
    MissingRejectionReason,

    /// The action is not legal from the current lifecycle state.
    #[error("cannot {action} an agent that is {from}")]
    InvalidTransition {
        from: LifecycleState,
        action: &'static str,
    },

    /// Star rating outside 1..=5.
    #[error("rating must be between 1 and 5 stars, got {0}")]
    InvalidStars(i64),

    /// The call status change is not in the transition graph.
    #[error("call cannot move from {from} to {to}")]
    InvalidCallTransition { from: CallStatus, to: CallStatus },

    /// Customers rate only agents they have called.
    #[error("you can only rate an agent after a call with them")]
    ReviewWithoutCall,

    /// Scheduled calls must be in the future.
    #[error("scheduled time must be in the future")]
    ScheduleInPast,

    /// Coordinates that are not a valid latitude/longitude pair.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// An enum value that could not be parsed.
    #[error("unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}
