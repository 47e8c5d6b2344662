//! Apply lifecycle actions: decide, persist, then notify.

use chrono::Utc;
use database::{agent, profile, review, Agent};
use marketplace_core::{
    AdminAction, DomainError, LifecycleNotification, NotificationKind, Notifier, OwnerAction,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::state::AppState;
use crate::views::AgentView;

/// What a lifecycle action produced.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleOutcome {
    pub agent: AgentView,
    /// `None` when the action owes no notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_sent: Option<bool>,
}

/// Run an administrator action against an agent.
///
/// The new standing is committed before the notification is attempted. A
/// failed send is logged and reported, never rolled back. If the record
/// changed since it was read, nothing is written and the caller gets 409.
pub async fn apply_admin_action(
    state: &AppState,
    agent_id: &str,
    action: AdminAction,
) -> Result<LifecycleOutcome> {
    if let AdminAction::Reject { reason } = &action {
        if reason.trim().is_empty() {
            return Err(DomainError::MissingRejectionReason.into());
        }
    }

    let pool = state.db.pool();
    let current = agent::get_agent(pool, agent_id).await?;
    let transition = current.standing().apply_admin(&action, Utc::now())?;
    let updated = agent::save_standing(pool, &current, &transition.standing).await?;

    info!(
        agent_id = %agent_id,
        action = action.kind().as_str(),
        from = %current.standing().lifecycle_state(),
        to = %transition.standing.lifecycle_state(),
        "Applied admin action"
    );

    let notification_sent = match transition.notify {
        Some(kind) => Some(notify_owner(state, &updated, kind).await),
        None => None,
    };

    outcome(state, updated, notification_sent).await
}

/// Run an action the agent takes on their own listing.
pub async fn apply_owner_action(
    state: &AppState,
    owner_id: &str,
    action: OwnerAction,
) -> Result<LifecycleOutcome> {
    let pool = state.db.pool();
    let current = agent::get_agent_by_owner(pool, owner_id).await?;
    let transition = current.standing().apply_owner(&action)?;
    let updated = agent::save_standing(pool, &current, &transition.standing).await?;

    info!(
        agent_id = %current.id,
        action = action.kind().as_str(),
        "Applied owner action"
    );

    outcome(state, updated, None).await
}

async fn outcome(
    state: &AppState,
    agent: Agent,
    notification_sent: Option<bool>,
) -> Result<LifecycleOutcome> {
    let rating = review::get_rating(state.db.pool(), &agent.id).await?;
    Ok(LifecycleOutcome {
        agent: AgentView::new(agent, rating),
        notification_sent,
    })
}

/// Tell the owner about an approval or rejection. Returns whether it went out.
///
/// Runs after the new standing is committed, so every failure here is
/// reported as `false` rather than as an error.
async fn notify_owner(state: &AppState, agent: &Agent, kind: NotificationKind) -> bool {
    let email = match profile::registered_email(state.db.pool(), &agent.owner_id).await {
        Ok(Some(email)) => email,
        Ok(None) => {
            warn!(
                agent_id = %agent.id,
                owner_id = %agent.owner_id,
                "No registered email; skipping lifecycle notification"
            );
            return false;
        }
        Err(e) => {
            warn!(
                agent_id = %agent.id,
                owner_id = %agent.owner_id,
                error = %e,
                "Could not read registered email; skipping lifecycle notification"
            );
            return false;
        }
    };

    let notification = match kind {
        NotificationKind::Approved => LifecycleNotification::approved(email, &agent.name),
        NotificationKind::Rejected => LifecycleNotification::rejected(
            email,
            &agent.name,
            agent.rejection_reason.as_deref().unwrap_or_default(),
        ),
    };

    send(state.notifier.as_ref(), &notification).await
}

#[instrument(skip_all, fields(notifier = notifier.name(), kind = ?notification.kind))]
async fn send(notifier: &dyn Notifier, notification: &LifecycleNotification) -> bool {
    match notifier.notify(notification).await {
        Ok(()) => {
            info!("Lifecycle notification sent");
            true
        }
        Err(e) => {
            warn!(error = %e, "Lifecycle notification failed");
            false
        }
    }
}
