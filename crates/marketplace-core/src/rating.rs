//! Star ratings and their running aggregate.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A validated 1-5 star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Stars(u8);

impl Stars {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::InvalidStars(value))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Stars {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stars> for i64 {
    fn from(stars: Stars) -> Self {
        stars.0 as i64
    }
}

/// Running `(count, sum)` aggregate of an agent's reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSummary {
    pub count: u32,
    pub sum: u32,
}

impl RatingSummary {
    pub fn from_stars(stars: impl IntoIterator<Item = Stars>) -> Self {
        stars.into_iter().fold(Self::default(), |acc, s| Self {
            count: acc.count + 1,
            sum: acc.sum + s.get() as u32,
        })
    }

    /// Aggregate after a review upsert.
    ///
    /// `previous` is the reviewer's earlier rating for the same agent; when
    /// present the count stays the same and only the sum moves.
    pub fn with_upsert(&self, previous: Option<Stars>, new: Stars) -> Self {
        match previous {
            Some(old) => Self {
                count: self.count,
                sum: self.sum.saturating_sub(old.get() as u32) + new.get() as u32,
            },
            None => Self {
                count: self.count + 1,
                sum: self.sum + new.get() as u32,
            },
        }
    }

    pub fn has_reviews(&self) -> bool {
        self.count > 0
    }

    /// Mean rating rounded to one decimal; 0.0 without reviews.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.sum as f64 / self.count as f64;
        (mean * 10.0).round() / 10.0
    }

    pub fn view(&self) -> RatingView {
        RatingView {
            average: self.average(),
            count: self.count,
            has_reviews: self.has_reviews(),
        }
    }
}

/// Serializable form returned with listings and detail views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingView {
    pub average: f64,
    pub count: u32,
    pub has_reviews: bool,
}
