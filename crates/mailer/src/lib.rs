//! # mailer
//!
//! SMTP delivery of agent lifecycle email ("approved" / "rejected").
//!
//! [`SmtpMailer`] implements [`marketplace_core::Notifier`], so the API
//! server can hold it as an `Arc<dyn Notifier>`.
//!
//! ```no_run
//! use mailer::{MailerConfig, SmtpMailer};
//! use marketplace_core::{LifecycleNotification, Notifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mailer = SmtpMailer::new(MailerConfig::from_env()?)?;
//!
//!     let notification = LifecycleNotification::approved("agent@example.in", "Ravi");
//!     mailer.notify(&notification).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
pub mod templates;
mod types;

pub use client::SmtpMailer;
pub use config::MailerConfig;
pub use error::MailerError;
pub use types::Email;
