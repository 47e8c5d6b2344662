//! The signed-in agent's own listing, and anyone's call history.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use database::{agent, call, review, AgentProfileUpdate, Call};
use marketplace_core::{OwnerAction, Role};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::services::lifecycle::{self, LifecycleOutcome};
use crate::session::Session;
use crate::state::AppState;
use crate::storage::public_url;
use crate::views::{AgentView, OwnerAgentView};

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub struct AvatarParams {
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

async fn owner_view(state: &AppState, listing: database::Agent) -> Result<OwnerAgentView> {
    let rating = review::get_rating(state.db.pool(), &listing.id).await?;
    let actions = listing.standing().owner_actions();
    Ok(OwnerAgentView {
        agent: AgentView::new(listing, rating),
        actions,
    })
}

/// The caller's listing with the actions open to them.
pub async fn get_listing(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<OwnerAgentView>> {
    let user = session.require_role(Role::Agent)?;
    let listing = agent::get_agent_by_owner(state.db.pool(), &user.id).await?;
    Ok(Json(owner_view(&state, listing).await?))
}

/// Save profile edits. Completeness is recomputed on every save.
pub async fn update_listing(
    State(state): State<AppState>,
    session: Session,
    Json(update): Json<AgentProfileUpdate>,
) -> Result<Json<OwnerAgentView>> {
    let user = session.require_role(Role::Agent)?;
    let listing = agent::update_profile(state.db.pool(), &user.id, update).await?;
    Ok(Json(owner_view(&state, listing).await?))
}

/// Go online or offline.
pub async fn set_availability(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<AvailabilityRequest>,
) -> Result<Json<LifecycleOutcome>> {
    let user = session.require_role(Role::Agent)?;
    let outcome =
        lifecycle::apply_owner_action(&state, &user.id, OwnerAction::SetAvailability(req.available))
            .await?;
    Ok(Json(outcome))
}

/// Ask for another review after a rejection.
pub async fn reapply(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<LifecycleOutcome>> {
    let user = session.require_role(Role::Agent)?;
    let outcome = lifecycle::apply_owner_action(&state, &user.id, OwnerAction::Reapply).await?;
    Ok(Json(outcome))
}

/// Replace the listing's avatar with the raw image in the body.
pub async fn upload_avatar(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<AvatarParams>,
    body: Bytes,
) -> Result<Json<AvatarResponse>> {
    let user = session.require_role(Role::Agent)?;

    // Make sure there is a listing before writing anything to disk.
    agent::get_agent_by_owner(state.db.pool(), &user.id).await?;

    let key = state.avatars.save(&user.id, &params.filename, &body).await?;
    agent::set_avatar(state.db.pool(), &user.id, &key).await?;

    Ok(Json(AvatarResponse {
        avatar_url: public_url(&key),
    }))
}

/// Calls the caller took part in, newest first.
pub async fn calls(State(state): State<AppState>, session: Session) -> Result<Json<Vec<Call>>> {
    let user = session.require_user()?;
    let pool = state.db.pool();

    let calls = match session.role {
        Some(Role::Customer) => call::list_for_customer(pool, &user.id).await?,
        Some(Role::Agent) => {
            let listing = agent::get_agent_by_owner(pool, &user.id).await?;
            call::list_for_agent(pool, &listing.id).await?
        }
        _ => return Err(ApiError::forbidden("Only agents and customers have calls")),
    };

    Ok(Json(calls))
}
