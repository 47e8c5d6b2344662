//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use geocoder::ReverseGeocoder;
use marketplace_core::{async_trait, LifecycleNotification, Notifier, NotifyError};

use crate::session::TokenVerifier;
use crate::storage::AvatarStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Lifecycle email sender.
    pub notifier: Arc<dyn Notifier>,
    /// Reverse geocoder for "near you".
    pub geocoder: ReverseGeocoder,
    /// Bearer token verification.
    pub auth: Arc<TokenVerifier>,
    /// Avatar storage.
    pub avatars: AvatarStore,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        db: Database,
        notifier: Arc<dyn Notifier>,
        geocoder: ReverseGeocoder,
        auth: TokenVerifier,
        avatars: AvatarStore,
    ) -> Self {
        Self {
            db,
            notifier,
            geocoder,
            auth: Arc::new(auth),
            avatars,
        }
    }
}

/// Stand-in used when SMTP is not configured. Every send fails.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, notification: &LifecycleNotification) -> Result<(), NotifyError> {
        tracing::warn!(
            kind = ?notification.kind,
            to = %notification.agent_email,
            "Email is not configured; lifecycle notification dropped"
        );
        Err(NotifyError::Delivery("email is not configured".to_string()))
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
