//! Public listing visibility, filters, and ordering.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::agent::{ReviewStatus, Standing};

/// Default page size for agent listings.
pub const DEFAULT_LISTING_LIMIT: u32 = 50;

/// Upper bound on the page size a caller may request.
pub const MAX_LISTING_LIMIT: u32 = 100;

/// Number of agents shown on featured surfaces.
pub const FEATURED_LIMIT: u32 = 6;

/// Column values a record must carry to appear in a listing.
///
/// The storage layer turns these into a filter and the same value re-checks
/// rows in memory, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConstraints {
    pub profile_complete: bool,
    pub review_status: ReviewStatus,
}

/// Complete, verified, not rejected.
pub const PUBLIC_LISTING: ListingConstraints = ListingConstraints {
    profile_complete: true,
    review_status: ReviewStatus::Verified,
};

impl ListingConstraints {
    pub fn admits(&self, standing: &Standing) -> bool {
        standing.profile_complete == self.profile_complete
            && standing.review_status == self.review_status
    }
}

/// Sort key for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingKey {
    pub premium: bool,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Premium first, then verified, then newest.
pub fn listing_order(a: &ListingKey, b: &ListingKey) -> Ordering {
    b.premium
        .cmp(&a.premium)
        .then_with(|| b.verified.cmp(&a.verified))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Optional filters for the "find agents" search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingFilter {
    /// Exact state, case-insensitive.
    pub state: Option<String>,
    /// Exact city, case-insensitive.
    pub city: Option<String>,
    /// Substring of the area.
    pub area: Option<String>,
    /// Postal code prefix.
    pub postal_code: Option<String>,
    /// Exact category tag.
    pub category: Option<String>,
    /// Free text matched against name and description.
    pub q: Option<String>,
    pub limit: Option<u32>,
}

impl ListingFilter {
    /// Trim every field and drop the blank ones.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            state: clean(self.state),
            city: clean(self.city),
            area: clean(self.area),
            postal_code: clean(self.postal_code),
            category: clean(self.category),
            q: clean(self.q),
            limit: self.limit,
        }
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_LISTING_LIMIT)
            .clamp(1, MAX_LISTING_LIMIT)
    }

    /// Same filter, capped at the featured surface size.
    pub fn featured(self) -> Self {
        Self {
            limit: Some(FEATURED_LIMIT),
            ..self
        }
    }
}
