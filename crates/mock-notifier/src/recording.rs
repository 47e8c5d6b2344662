//! Recording notifier - keeps every notification it is handed.

use std::sync::Arc;

use marketplace_core::{async_trait, LifecycleNotification, Notifier, NotifyError};
use tokio::sync::Mutex;

/// A notifier that accepts everything and remembers it.
///
/// Clones share the same log, so a test can keep one handle while the
/// server holds another.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<LifecycleNotification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications delivered so far, oldest first.
    pub async fn sent(&self) -> Vec<LifecycleNotification> {
        self.sent.lock().await.clone()
    }

    /// The most recent notification, if any.
    pub async fn last(&self) -> Option<LifecycleNotification> {
        self.sent.lock().await.last().cloned()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &LifecycleNotification) -> Result<(), NotifyError> {
        self.sent.lock().await.push(notification.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "RecordingNotifier"
    }
}
