//! Administrator review queue and actions.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use database::{agent, role, Agent};
use marketplace_core::{AdminAction, LifecycleState, Role};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::routes::agents::with_ratings;
use crate::services::lifecycle::{self, LifecycleOutcome};
use crate::session::Session;
use crate::state::AppState;
use crate::views::AdminAgentView;

#[derive(Debug, Default, Deserialize)]
pub struct QueueParams {
    /// `incomplete`, `pending`, `verified`, or `rejected`; all when absent.
    pub status: Option<String>,
}

impl QueueParams {
    pub fn lifecycle_state(&self) -> Result<Option<LifecycleState>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(status) => Ok(Some(status.parse()?)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct PremiumRequest {
    pub premium: bool,
}

/// Marketplace counters for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub incomplete: i64,
    pub pending_review: i64,
    pub verified: i64,
    pub rejected: i64,
    pub premium: i64,
    pub users_by_role: BTreeMap<String, i64>,
}

/// Fetch the queue rows for one lifecycle state.
pub(crate) async fn queue(
    state: &AppState,
    filter: Option<LifecycleState>,
) -> Result<Vec<AdminAgentView>> {
    let agents = agent::list_by_lifecycle(state.db.pool(), filter).await?;
    let owners: Vec<(String, Vec<_>)> = agents
        .iter()
        .map(|a: &Agent| (a.owner_id.clone(), a.standing().admin_actions()))
        .collect();

    let views = with_ratings(state, agents).await?;
    Ok(views
        .into_iter()
        .zip(owners)
        .map(|(agent, (owner_id, actions))| AdminAgentView {
            agent,
            owner_id,
            actions,
        })
        .collect())
}

pub(crate) async fn get_stats(state: &AppState) -> Result<Stats> {
    let pool = state.db.pool();
    let (counts, premium) = agent::lifecycle_counts(pool).await?;
    let count = |s: LifecycleState| counts.get(&s).copied().unwrap_or(0);

    let users_by_role = role::count_by_role(pool)
        .await?
        .into_iter()
        .map(|(role, n)| (role.to_string(), n))
        .collect();

    Ok(Stats {
        incomplete: count(LifecycleState::Incomplete),
        pending_review: count(LifecycleState::PendingReview),
        verified: count(LifecycleState::Verified),
        rejected: count(LifecycleState::Rejected),
        premium,
        users_by_role,
    })
}

/// List agents for review.
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<QueueParams>,
) -> Result<Json<Vec<AdminAgentView>>> {
    session.require_role(Role::Admin)?;
    Ok(Json(queue(&state, params.lifecycle_state()?).await?))
}

async fn act(
    state: &AppState,
    session: &Session,
    agent_id: &str,
    action: AdminAction,
) -> Result<Json<LifecycleOutcome>> {
    let admin = session.require_role(Role::Admin)?;
    tracing::debug!(admin_id = %admin.id, agent_id = %agent_id, ?action, "Admin action requested");
    Ok(Json(lifecycle::apply_admin_action(state, agent_id, action).await?))
}

pub async fn verify(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<LifecycleOutcome>> {
    act(&state, &session, &id, AdminAction::Verify).await
}

pub async fn revoke(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<LifecycleOutcome>> {
    act(&state, &session, &id, AdminAction::Revoke).await
}

pub async fn reject(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<LifecycleOutcome>> {
    act(&state, &session, &id, AdminAction::Reject { reason: req.reason }).await
}

pub async fn restore(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<LifecycleOutcome>> {
    act(&state, &session, &id, AdminAction::Restore).await
}

pub async fn premium(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<PremiumRequest>,
) -> Result<Json<LifecycleOutcome>> {
    act(&state, &session, &id, AdminAction::SetPremium(req.premium)).await
}

/// Dashboard counters as JSON.
pub async fn stats(State(state): State<AppState>, session: Session) -> Result<Json<Stats>> {
    session.require_role(Role::Admin)?;
    Ok(Json(get_stats(&state).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_params_parse() {
        let params = |s: Option<&str>| QueueParams {
            status: s.map(str::to_string),
        };

        assert_eq!(params(None).lifecycle_state().unwrap(), None);
        assert_eq!(params(Some("all")).lifecycle_state().unwrap(), None);
        assert_eq!(
            params(Some("pending")).lifecycle_state().unwrap(),
            Some(LifecycleState::PendingReview)
        );
        assert!(params(Some("premium")).lifecycle_state().is_err());
    }
}
