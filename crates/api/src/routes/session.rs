//! Session and onboarding routes.

use axum::extract::State;
use axum::Json;
use database::onboarding;
use marketplace_core::Role;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::session::{AuthUser, Session};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub user: Option<AuthUser>,
    pub role: Option<Role>,
    /// True for a signed-in user who has not picked a role yet.
    pub needs_onboarding: bool,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            needs_onboarding: session.user.is_some() && session.role.is_none(),
            user: session.user,
            role: session.role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChooseRole {
    pub role: Role,
}

/// Who the caller is.
pub async fn current(session: Session) -> Json<SessionView> {
    Json(session.into())
}

/// Pick agent or customer, once. Agents get an empty listing to fill in.
pub async fn choose_role(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<ChooseRole>,
) -> Result<Json<SessionView>> {
    let user = session.require_user()?.clone();

    if session.role.is_some() {
        return Err(ApiError::Conflict("A role has already been chosen".to_string()));
    }
    if !req.role.is_self_selectable() {
        return Err(ApiError::forbidden("That role cannot be self-assigned"));
    }

    let listing =
        onboarding::onboard(state.db.pool(), &user.id, req.role, user.email.as_deref()).await?;
    match listing {
        Some(listing) => info!(user_id = %user.id, agent_id = %listing.id, "Agent onboarded"),
        None => info!(user_id = %user.id, role = %req.role, "User onboarded"),
    }

    Ok(Json(
        Session {
            user: Some(user),
            role: Some(req.role),
        }
        .into(),
    ))
}
