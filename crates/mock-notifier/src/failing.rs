//! Failing notifier - refuses every notification.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use marketplace_core::{async_trait, LifecycleNotification, Notifier, NotifyError};

/// A notifier whose deliveries always fail.
///
/// Useful for checking that a committed state change survives a failed send.
#[derive(Debug, Clone)]
pub struct FailingNotifier {
    message: String,
    attempts: Arc<AtomicUsize>,
}

impl FailingNotifier {
    pub fn new() -> Self {
        Self::with_message("mail relay unavailable")
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many sends were attempted.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for FailingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _notification: &LifecycleNotification) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Delivery(self.message.clone()))
    }

    fn name(&self) -> &str {
        "FailingNotifier"
    }
}
