//! Core rules for the Agentwaala marketplace.
//!
//! This crate holds the decision logic shared by storage and HTTP layers.
//! Nothing in here talks to a database or the network:
//!
//! - [`Standing`] - the lifecycle-relevant slice of an agent record
//! - [`AdminAction`] / [`OwnerAction`] - state transitions and their rules
//! - [`PUBLIC_LISTING`] - the single visibility predicate for public listings
//! - [`RatingSummary`] - denormalized rating aggregate
//! - [`CallStatus`] - the call state machine
//! - [`Notifier`] - the seam for lifecycle notifications (email)
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use marketplace_core::{AdminAction, LifecycleState, Standing};
//!
//! let standing = Standing {
//!     profile_complete: true,
//!     ..Standing::default()
//! };
//! assert_eq!(standing.lifecycle_state(), LifecycleState::PendingReview);
//!
//! let transition = standing.apply_admin(&AdminAction::Verify, Utc::now()).unwrap();
//! assert!(transition.standing.is_publicly_visible());
//! ```

mod agent;
mod call;
mod error;
mod lifecycle;
pub mod location;
mod notifier;
mod rating;
mod role;
mod visibility;

pub use agent::{is_profile_complete, LifecycleState, Rejection, RequiredFields, ReviewStatus, Standing};
pub use call::{CallStatus, ContactRequest};
pub use error::DomainError;
pub use lifecycle::{AdminAction, AdminActionKind, OwnerAction, OwnerActionKind, Transition};
pub use notifier::{LifecycleNotification, NotificationKind, Notifier, NotifyError};
pub use rating::{RatingSummary, RatingView, Stars};
pub use role::Role;
pub use visibility::{
    listing_order, ListingConstraints, ListingFilter, ListingKey, DEFAULT_LISTING_LIMIT,
    FEATURED_LIMIT, MAX_LISTING_LIMIT, PUBLIC_LISTING,
};

// Re-export async_trait for notifier implementations
pub use async_trait::async_trait;
