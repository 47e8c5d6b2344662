//! Server-rendered review queue.

use askama::Template;
use axum::extract::{Query, State};
use marketplace_core::{AdminActionKind, LifecycleState, Role};

use crate::error::Result;
use crate::routes::admin::{get_stats, queue, QueueParams, Stats};
use crate::session::Session;
use crate::state::AppState;
use crate::views::AdminAgentView;

/// Review queue page template.
#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub stats: Stats,
    pub filter: String,
    pub rows: Vec<AdminAgentView>,
}

/// Render the review queue. Defaults to agents awaiting review.
pub async fn admin_page(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<QueueParams>,
) -> Result<AdminTemplate> {
    session.require_role(Role::Admin)?;

    let filter = match params.status {
        Some(_) => params.lifecycle_state()?,
        None => Some(LifecycleState::PendingReview),
    };

    Ok(AdminTemplate {
        stats: get_stats(&state).await?,
        filter: filter.map(|s| s.to_string()).unwrap_or_else(|| "all".to_string()),
        rows: queue(&state, filter).await?,
    })
}
