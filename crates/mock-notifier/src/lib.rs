//! Mock notifier implementations for agent lifecycle flows.
//!
//! This crate provides mock implementations of the `Notifier` trait for testing:
//! - `RecordingNotifier` - Accepts every notification and keeps it for inspection
//! - `FailingNotifier` - Refuses every notification with a delivery error
//!
//! For real delivery, use the `mailer` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_notifier::{LifecycleNotification, Notifier, RecordingNotifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_notifier::NotifyError> {
//!     let notifier = RecordingNotifier::new();
//!
//!     notifier
//!         .notify(&LifecycleNotification::approved("agent@example.in", "Ravi"))
//!         .await?;
//!
//!     assert_eq!(notifier.sent().await.len(), 1);
//!     Ok(())
//! }
//! ```

mod failing;
mod recording;

// Re-export core types for convenience
pub use marketplace_core::{async_trait, LifecycleNotification, NotificationKind, Notifier, NotifyError};

pub use failing::FailingNotifier;
pub use recording::RecordingNotifier;
