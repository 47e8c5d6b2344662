//! Customer-initiated calls.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use database::{agent, call, Call, NewCall};
use marketplace_core::{CallStatus, ContactRequest, Role};
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCallRequest {
    pub agent_id: String,
    /// Omitted for "call now".
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: CallStatus,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
}

/// Call an agent now or book a time.
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CreateCallRequest>,
) -> Result<(StatusCode, Json<Call>)> {
    let customer = session.require_role(Role::Customer)?;
    let pool = state.db.pool();

    let listing = agent::get_agent(pool, &req.agent_id).await?;
    if !listing.standing().is_publicly_visible() {
        return Err(ApiError::not_found("Agent"));
    }

    let request = ContactRequest::from_schedule(req.scheduled_at);
    if request == ContactRequest::Immediate && !listing.available {
        return Err(ApiError::Conflict("Agent is offline; schedule a call instead".to_string()));
    }

    let created = call::create_call(
        pool,
        NewCall {
            customer_id: &customer.id,
            agent_id: &listing.id,
            request,
            category: req.category.as_deref(),
            notes: req.notes.as_deref(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Move a call along. Only the customer and the agent's owner may.
pub async fn update_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Call>> {
    let user = session.require_user()?;
    let pool = state.db.pool();

    let existing = call::get_call(pool, &id).await?;
    let is_customer = existing.customer_id == user.id;
    let is_agent = agent::get_agent(pool, &existing.agent_id).await?.owner_id == user.id;
    if !is_customer && !is_agent {
        return Err(ApiError::not_found("Call"));
    }

    let updated = call::update_call_status(pool, &id, req.status, req.duration_seconds).await?;
    Ok(Json(updated))
}
