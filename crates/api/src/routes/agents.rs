//! Public agent discovery and customer reviews.

use axum::extract::{Path, Query, State};
use axum::Json;
use database::{agent, review, Agent};
use marketplace_core::{ListingFilter, RatingView, Role, Stars};
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::session::Session;
use crate::state::AppState;
use crate::views::AgentView;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub stars: i64,
}

/// Attach rating summaries to a batch of agents, keeping their order.
pub(crate) async fn with_ratings(state: &AppState, agents: Vec<Agent>) -> Result<Vec<AgentView>> {
    let ids: Vec<String> = agents.iter().map(|a| a.id.clone()).collect();
    let mut ratings = review::ratings_for(state.db.pool(), &ids).await?;

    Ok(agents
        .into_iter()
        .map(|a| {
            let rating = ratings.remove(&a.id).unwrap_or_default();
            AgentView::new(a, rating)
        })
        .collect())
}

/// Search verified agents.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ListingFilter>,
) -> Result<Json<Vec<AgentView>>> {
    let agents = agent::list_public(state.db.pool(), &filter.normalized()).await?;
    Ok(Json(with_ratings(&state, agents).await?))
}

/// The short premium-first strip on the home page.
pub async fn featured(
    State(state): State<AppState>,
    Query(filter): Query<ListingFilter>,
) -> Result<Json<Vec<AgentView>>> {
    let agents = agent::list_public(state.db.pool(), &filter.normalized().featured()).await?;
    Ok(Json(with_ratings(&state, agents).await?))
}

/// One agent. Hidden listings are only shown to their owner and admins.
pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<AgentView>> {
    let pool = state.db.pool();
    let listing = agent::get_agent(pool, &id).await?;

    let is_owner = session.user_id() == Some(listing.owner_id.as_str());
    if !listing.standing().is_publicly_visible() && !is_owner && !session.is_admin() {
        return Err(ApiError::not_found("Agent"));
    }

    let rating = review::get_rating(pool, &listing.id).await?;
    Ok(Json(AgentView::new(listing, rating)))
}

/// Rate an agent 1-5. Rating again replaces the earlier stars.
pub async fn rate(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<RatingView>> {
    let customer = session.require_role(Role::Customer)?;
    let stars = Stars::new(req.stars)?;

    let pool = state.db.pool();
    let listing = agent::get_agent(pool, &id).await?;
    let summary = review::upsert_review(pool, &customer.id, &listing.id, stars).await?;

    Ok(Json(summary.view()))
}
