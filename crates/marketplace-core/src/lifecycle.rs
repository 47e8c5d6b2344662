//! Administrator and owner transitions over an agent's standing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::{LifecycleState, Rejection, ReviewStatus, Standing};
use crate::error::DomainError;
use crate::notifier::NotificationKind;

/// Actions only an administrator may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    /// Grant verification to a pending agent.
    Verify,
    /// Withdraw verification, returning the agent to pending review.
    Revoke,
    /// Reject with a reason.
    Reject { reason: String },
    /// Clear a rejection, returning the agent to pending review.
    Restore,
    /// Grant or remove the premium flag.
    SetPremium(bool),
}

impl AdminAction {
    pub fn kind(&self) -> AdminActionKind {
        match self {
            AdminAction::Verify => AdminActionKind::Verify,
            AdminAction::Revoke => AdminActionKind::Revoke,
            AdminAction::Reject { .. } => AdminActionKind::Reject,
            AdminAction::Restore => AdminActionKind::Restore,
            AdminAction::SetPremium(true) => AdminActionKind::GrantPremium,
            AdminAction::SetPremium(false) => AdminActionKind::RemovePremium,
        }
    }
}

/// Actions the owning agent may take on their own record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerAction {
    /// Ask for another review after a rejection.
    Reapply,
    /// Go online or offline.
    SetAvailability(bool),
}

impl OwnerAction {
    pub fn kind(&self) -> OwnerActionKind {
        match self {
            OwnerAction::Reapply => OwnerActionKind::Reapply,
            OwnerAction::SetAvailability(true) => OwnerActionKind::GoOnline,
            OwnerAction::SetAvailability(false) => OwnerActionKind::GoOffline,
        }
    }
}

/// Admin action names, as offered to the review UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminActionKind {
    Verify,
    Revoke,
    Reject,
    Restore,
    GrantPremium,
    RemovePremium,
}

impl AdminActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminActionKind::Verify => "verify",
            AdminActionKind::Revoke => "revoke",
            AdminActionKind::Reject => "reject",
            AdminActionKind::Restore => "restore",
            AdminActionKind::GrantPremium => "grant premium to",
            AdminActionKind::RemovePremium => "remove premium from",
        }
    }
}

/// Owner action names, as offered to the agent dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerActionKind {
    EditProfile,
    Reapply,
    GoOnline,
    GoOffline,
}

impl OwnerActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerActionKind::EditProfile => "edit",
            OwnerActionKind::Reapply => "reapply for",
            OwnerActionKind::GoOnline => "bring online",
            OwnerActionKind::GoOffline => "take offline",
        }
    }
}

/// Result of a legal transition: the new standing and any notification owed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub standing: Standing,
    pub notify: Option<NotificationKind>,
}

impl Transition {
    fn quiet(standing: Standing) -> Self {
        Self {
            standing,
            notify: None,
        }
    }
}

impl Standing {
    /// Apply an administrator action.
    ///
    /// Illegal actions return `Err(DomainError)` and leave `self` unchanged.
    /// On success the caller persists `Transition::standing` and then sends
    /// `Transition::notify`, if any.
    pub fn apply_admin(
        &self,
        action: &AdminAction,
        now: DateTime<Utc>,
    ) -> Result<Transition, DomainError> {
        let state = self.lifecycle_state();
        let invalid = || DomainError::InvalidTransition {
            from: state,
            action: action.kind().as_str(),
        };

        match action {
            AdminAction::Verify => {
                if self.review_status != ReviewStatus::Pending {
                    return Err(invalid());
                }
                if !self.profile_complete {
                    return Err(DomainError::ProfileIncomplete);
                }
                Ok(Transition {
                    standing: Standing {
                        review_status: ReviewStatus::Verified,
                        ..self.clone()
                    },
                    notify: Some(NotificationKind::Approved),
                })
            }
            AdminAction::Revoke => {
                if self.review_status != ReviewStatus::Verified {
                    return Err(invalid());
                }
                Ok(Transition::quiet(Standing {
                    review_status: ReviewStatus::Pending,
                    ..self.clone()
                }))
            }
            AdminAction::Reject { reason } => {
                let reason = reason.trim();
                if reason.is_empty() {
                    return Err(DomainError::MissingRejectionReason);
                }
                if self.rejected() {
                    return Err(invalid());
                }
                Ok(Transition {
                    standing: Standing {
                        review_status: ReviewStatus::Rejected,
                        rejection: Some(Rejection {
                            reason: reason.to_string(),
                            at: now,
                        }),
                        ..self.clone()
                    },
                    notify: Some(NotificationKind::Rejected),
                })
            }
            AdminAction::Restore => self.clear_rejection().ok_or_else(invalid),
            AdminAction::SetPremium(premium) => {
                if *premium && !self.profile_complete {
                    return Err(DomainError::ProfileIncomplete);
                }
                Ok(Transition::quiet(Standing {
                    premium: *premium,
                    ..self.clone()
                }))
            }
        }
    }

    /// Apply an action taken by the owning agent.
    pub fn apply_owner(&self, action: &OwnerAction) -> Result<Transition, DomainError> {
        match action {
            OwnerAction::Reapply => {
                self.clear_rejection()
                    .ok_or_else(|| DomainError::InvalidTransition {
                        from: self.lifecycle_state(),
                        action: action.kind().as_str(),
                    })
            }
            OwnerAction::SetAvailability(available) => {
                if *available && !self.profile_complete {
                    return Err(DomainError::ProfileIncomplete);
                }
                Ok(Transition::quiet(Standing {
                    available: *available,
                    ..self.clone()
                }))
            }
        }
    }

    /// Actions an administrator could legally take next.
    pub fn admin_actions(&self) -> Vec<AdminActionKind> {
        let mut actions = Vec::new();

        match self.lifecycle_state() {
            LifecycleState::PendingReview => {
                actions.push(AdminActionKind::Verify);
                actions.push(AdminActionKind::Reject);
            }
            LifecycleState::Verified => {
                actions.push(AdminActionKind::Revoke);
                actions.push(AdminActionKind::Reject);
            }
            LifecycleState::Rejected => actions.push(AdminActionKind::Restore),
            LifecycleState::Incomplete => {
                if self.verified() {
                    actions.push(AdminActionKind::Revoke);
                }
                actions.push(AdminActionKind::Reject);
            }
        }

        if self.premium {
            actions.push(AdminActionKind::RemovePremium);
        } else if self.profile_complete {
            actions.push(AdminActionKind::GrantPremium);
        }

        actions
    }

    /// Actions the owner could legally take next.
    pub fn owner_actions(&self) -> Vec<OwnerActionKind> {
        let mut actions = vec![OwnerActionKind::EditProfile];

        if self.rejected() {
            actions.push(OwnerActionKind::Reapply);
        }

        if self.available {
            actions.push(OwnerActionKind::GoOffline);
        } else if self.profile_complete {
            actions.push(OwnerActionKind::GoOnline);
        }

        actions
    }

    fn clear_rejection(&self) -> Option<Transition> {
        if !self.rejected() {
            return None;
        }
        Some(Transition::quiet(Standing {
            review_status: ReviewStatus::Pending,
            rejection: None,
            ..self.clone()
        }))
    }
}
