use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::MailerError;

/// Configuration for the outgoing SMTP relay.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// SMTP host
    pub smtp_host: String,
    /// SMTP port (default: 587, STARTTLS)
    pub smtp_port: u16,
    /// SMTP login
    pub username: String,
    /// SMTP password
    password: SecretString,
    /// Sender address (defaults to the login)
    pub from_address: String,
    /// Display name on outgoing mail
    pub from_name: String,
    /// Upper bound on a single send
    pub send_timeout: Duration,
}

impl MailerConfig {
    /// Create a new configuration with explicit values.
    pub fn new(
        smtp_host: impl Into<String>,
        smtp_port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let username = username.into();
        Self {
            smtp_host: smtp_host.into(),
            smtp_port,
            from_address: username.clone(),
            username,
            password: SecretString::from(password.into()),
            from_name: "Agentwaala".to_string(),
            send_timeout: Duration::from_secs(30),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `SMTP_HOST` - relay hostname
    /// - `SMTP_USERNAME` - relay login
    /// - `SMTP_PASSWORD` - relay password
    ///
    /// Optional (with defaults):
    /// - `SMTP_PORT` - Default: 587
    /// - `MAIL_FROM` - Default: `SMTP_USERNAME`
    /// - `MAIL_FROM_NAME` - Default: Agentwaala
    /// - `SMTP_TIMEOUT_SECS` - Default: 30
    pub fn from_env() -> Result<Self, MailerError> {
        let smtp_host =
            env::var("SMTP_HOST").map_err(|_| MailerError::MissingEnvVar("SMTP_HOST".to_string()))?;

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|e| MailerError::Config(format!("Invalid SMTP_PORT: {}", e)))?;

        let username = env::var("SMTP_USERNAME")
            .map_err(|_| MailerError::MissingEnvVar("SMTP_USERNAME".to_string()))?;

        let password = env::var("SMTP_PASSWORD")
            .map_err(|_| MailerError::MissingEnvVar("SMTP_PASSWORD".to_string()))?;

        let from_address = env::var("MAIL_FROM").unwrap_or_else(|_| username.clone());
        let from_name = env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "Agentwaala".to_string());

        let timeout_secs = env::var("SMTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|e| MailerError::Config(format!("Invalid SMTP_TIMEOUT_SECS: {}", e)))?;

        Ok(Self {
            smtp_host,
            smtp_port,
            username,
            password: SecretString::from(password),
            from_address,
            from_name,
            send_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Get the password (exposes the secret).
    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// `Name <address>` header value for the sender.
    pub fn from_mailbox(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }

    /// Builder method to set the sender address.
    pub fn with_from_address(mut self, address: impl Into<String>) -> Self {
        self.from_address = address.into();
        self
    }

    /// Builder method to set the sender display name.
    pub fn with_from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = name.into();
        self
    }

    /// Builder method to set the send timeout.
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }
}
