use marketplace_core::NotifyError;
use thiserror::Error;

/// Errors that can occur when sending lifecycle email.
#[derive(Debug, Error)]
pub enum MailerError {
    /// Failed to build SMTP transport
    #[error("SMTP transport error: {0}")]
    Transport(String),

    /// Failed to send email
    #[error("Failed to send email: {0}")]
    Send(String),

    /// The relay did not answer in time
    #[error("Timed out sending email after {0}s")]
    Timeout(u64),

    /// Failed to build email message
    #[error("Failed to build email: {0}")]
    BuildEmail(String),

    /// Invalid email address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Notification payload missing required data
    #[error("Invalid notification: {0}")]
    InvalidNotification(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

impl From<MailerError> for NotifyError {
    fn from(err: MailerError) -> Self {
        match err {
            MailerError::InvalidAddress(_)
            | MailerError::InvalidNotification(_)
            | MailerError::BuildEmail(_) => NotifyError::Invalid(err.to_string()),
            _ => NotifyError::Delivery(err.to_string()),
        }
    }
}
