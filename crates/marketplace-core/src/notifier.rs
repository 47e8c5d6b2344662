//! Lifecycle notifications and the trait that delivers them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which lifecycle event the agent is being told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Approved,
    Rejected,
}

/// Payload sent to the agent's registered email.
///
/// Serializes as `{type, agentEmail, agentName, rejectionReason?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleNotification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub agent_email: String,
    pub agent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl LifecycleNotification {
    pub fn approved(agent_email: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Approved,
            agent_email: agent_email.into(),
            agent_name: agent_name.into(),
            rejection_reason: None,
        }
    }

    pub fn rejected(
        agent_email: impl Into<String>,
        agent_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: NotificationKind::Rejected,
            agent_email: agent_email.into(),
            agent_name: agent_name.into(),
            rejection_reason: Some(reason.into()),
        }
    }
}

/// Errors a notifier can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The notification could not be built (e.g. bad recipient address).
    #[error("notification rejected: {0}")]
    Invalid(String),

    /// Delivery failed.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Delivers lifecycle notifications.
///
/// Object-safe so the service can hold an `Arc<dyn Notifier>`.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification. A single attempt; no retries.
    async fn notify(&self, notification: &LifecycleNotification) -> Result<(), NotifyError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}
