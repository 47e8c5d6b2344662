//! Database models.

use chrono::{DateTime, Utc};
use marketplace_core::{
    CallStatus, ListingKey, Rejection, RequiredFields, ReviewStatus, Role, Stars, Standing,
};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::error::{DatabaseError, Result};

/// A service provider listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Agent {
    /// Listing ID (UUID)
    pub id: String,
    /// Identity of the owning user
    pub owner_id: String,
    /// Display name
    pub name: String,
    /// Contact phone
    pub phone: String,
    /// Storage key of the avatar image, if uploaded
    pub avatar_path: Option<String>,
    /// Category tags (e.g., "real-estate", "agriculture")
    pub categories: Json<Vec<String>>,
    pub state: String,
    pub city: String,
    pub area: String,
    pub postal_code: String,
    pub description: String,
    pub offers: String,
    /// Self-reported online/offline
    pub available: bool,
    /// Derived from required-field completeness on every save
    pub profile_complete: bool,
    /// Administrator review outcome
    pub review_status: ReviewStatus,
    /// Administrator-granted promotion
    pub premium: bool,
    pub rejection_reason: Option<String>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// The lifecycle-relevant slice of this record.
    pub fn standing(&self) -> Standing {
        let rejection = match (&self.rejection_reason, self.rejected_at) {
            (Some(reason), Some(at)) if self.review_status == ReviewStatus::Rejected => {
                Some(Rejection {
                    reason: reason.clone(),
                    at,
                })
            }
            _ => None,
        };

        Standing {
            profile_complete: self.profile_complete,
            review_status: self.review_status,
            premium: self.premium,
            available: self.available,
            rejection,
        }
    }

    pub fn required_fields(&self) -> RequiredFields<'_> {
        RequiredFields {
            name: &self.name,
            phone: &self.phone,
            state: &self.state,
            city: &self.city,
            categories: &self.categories,
        }
    }

    pub fn listing_key(&self) -> ListingKey {
        ListingKey {
            premium: self.premium,
            verified: self.verified(),
            created_at: self.created_at,
        }
    }

    pub fn verified(&self) -> bool {
        self.review_status == ReviewStatus::Verified
    }

    pub fn rejected(&self) -> bool {
        self.review_status == ReviewStatus::Rejected
    }
}

/// A customer/agent contact event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Call {
    /// Call ID (UUID)
    pub id: String,
    pub customer_id: String,
    pub agent_id: String,
    pub status: CallStatus,
    /// Set for scheduled calls
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Length of a completed call
    pub duration_seconds: Option<i64>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One customer's rating of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub customer_id: String,
    pub agent_id: String,
    pub stars: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn stars(&self) -> Result<Stars> {
        Stars::new(self.stars).map_err(DatabaseError::from)
    }
}

/// A user's role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRole {
    pub user_id: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Contact details for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: String,
    pub full_name: String,
    /// Registered email, used for lifecycle notifications
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
