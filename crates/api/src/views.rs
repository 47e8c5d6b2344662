//! JSON shapes returned to clients.

use chrono::{DateTime, Utc};
use database::Agent;
use marketplace_core::{
    AdminActionKind, LifecycleState, OwnerActionKind, RatingSummary, RatingView,
};
use serde::Serialize;

use crate::storage::public_url;

/// An agent as shown in listings and detail pages.
#[derive(Debug, Clone, Serialize)]
pub struct AgentView {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub avatar_url: Option<String>,
    pub categories: Vec<String>,
    pub state: String,
    pub city: String,
    pub area: String,
    pub postal_code: String,
    pub description: String,
    pub offers: String,
    pub available: bool,
    pub premium: bool,
    pub verified: bool,
    pub rejected: bool,
    pub profile_complete: bool,
    pub lifecycle_state: LifecycleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    pub rating: RatingView,
    pub created_at: DateTime<Utc>,
}

impl AgentView {
    pub fn new(agent: Agent, rating: RatingSummary) -> Self {
        let standing = agent.standing();
        let lifecycle_state = standing.lifecycle_state();
        let verified = standing.verified();
        let rejected = standing.rejected();
        let (rejection_reason, rejected_at) = match standing.rejection {
            Some(rejection) => (Some(rejection.reason), Some(rejection.at)),
            None => (None, None),
        };

        Self {
            verified,
            rejected,
            avatar_url: agent.avatar_path.as_deref().map(public_url),
            categories: agent.categories.0,
            id: agent.id,
            name: agent.name,
            phone: agent.phone,
            state: agent.state,
            city: agent.city,
            area: agent.area,
            postal_code: agent.postal_code,
            description: agent.description,
            offers: agent.offers,
            available: agent.available,
            premium: agent.premium,
            profile_complete: agent.profile_complete,
            lifecycle_state,
            rejection_reason,
            rejected_at,
            rating: rating.view(),
            created_at: agent.created_at,
        }
    }
}

/// The owner's dashboard view of their own listing.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerAgentView {
    pub agent: AgentView,
    pub actions: Vec<OwnerActionKind>,
}

/// A review-queue row.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAgentView {
    pub agent: AgentView,
    pub owner_id: String,
    pub actions: Vec<AdminActionKind>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::Json;
    use marketplace_core::{ReviewStatus, Stars};

    fn agent() -> Agent {
        let now = Utc::now();
        Agent {
            id: "agent-1".to_string(),
            owner_id: "owner-1".to_string(),
            name: "Ravi Kumar".to_string(),
            phone: "9876543210".to_string(),
            avatar_path: Some("owner-1/1-face.png".to_string()),
            categories: Json(vec!["real-estate".to_string()]),
            state: "Karnataka".to_string(),
            city: "Bengaluru".to_string(),
            area: "Indiranagar".to_string(),
            postal_code: "560038".to_string(),
            description: String::new(),
            offers: String::new(),
            available: true,
            profile_complete: true,
            review_status: ReviewStatus::Rejected,
            premium: false,
            rejection_reason: Some("Blurry photo".to_string()),
            rejected_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_agent_view_derives_flags() {
        let rating = RatingSummary::from_stars([Stars::new(5).unwrap(), Stars::new(4).unwrap()]);
        let view = AgentView::new(agent(), rating);

        assert!(view.rejected);
        assert!(!view.verified);
        assert_eq!(view.lifecycle_state, LifecycleState::Rejected);
        assert_eq!(view.rejection_reason.as_deref(), Some("Blurry photo"));
        assert_eq!(view.avatar_url.as_deref(), Some("/uploads/owner-1/1-face.png"));
        assert_eq!(view.rating.average, 4.5);
    }

    #[test]
    fn test_agent_view_json_without_reviews() {
        let mut pending = agent();
        pending.review_status = ReviewStatus::Pending;
        pending.rejection_reason = None;
        pending.rejected_at = None;

        let json = serde_json::to_value(AgentView::new(pending, RatingSummary::default())).unwrap();
        assert_eq!(json["lifecycle_state"], "pending_review");
        assert_eq!(json["rating"]["average"], 0.0);
        assert_eq!(json["rating"]["has_reviews"], false);
        assert!(json.get("rejection_reason").is_none());
    }
}
