use std::time::Duration;

use lettre::{
    message::{Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use marketplace_core::{async_trait, LifecycleNotification, Notifier, NotifyError};
use tracing::{info, instrument, warn};

use crate::{templates, Email, MailerConfig, MailerError};

/// Sends lifecycle email through an SMTP relay.
///
/// Uses connection pooling; one attempt per message.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    send_timeout: Duration,
}

impl SmtpMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: MailerConfig) -> Result<Self, MailerError> {
        let from: Mailbox = config
            .from_mailbox()
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("From: {}", e)))?;

        let creds = Credentials::new(config.username.clone(), config.password().to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailerError::Transport(e.to_string()))?
            .port(config.smtp_port)
            .credentials(creds)
            .timeout(Some(config.send_timeout))
            .build();

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            from = %from,
            "Created SMTP mailer"
        );

        Ok(Self {
            transport,
            from,
            send_timeout: config.send_timeout,
        })
    }

    /// Send an email.
    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    pub async fn send(&self, email: &Email) -> Result<(), MailerError> {
        let message = build_message(&self.from, email)?;

        tokio::time::timeout(self.send_timeout, self.transport.send(message))
            .await
            .map_err(|_| MailerError::Timeout(self.send_timeout.as_secs()))?
            .map_err(|e| MailerError::Send(e.to_string()))?;

        info!(to = %email.to, subject = %email.subject, "Email sent successfully");
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpMailer {
    async fn notify(&self, notification: &LifecycleNotification) -> Result<(), NotifyError> {
        let email = templates::render(notification)?;
        self.send(&email).await.map_err(|e| {
            warn!(kind = ?notification.kind, error = %e, "Lifecycle email failed");
            NotifyError::from(e)
        })
    }

    fn name(&self) -> &str {
        "smtp"
    }
}

/// Build a lettre Message from our Email type.
pub(crate) fn build_message(from: &Mailbox, email: &Email) -> Result<Message, MailerError> {
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| MailerError::InvalidAddress(format!("To '{}': {}", email.to, e)))?;

    let builder = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(&email.subject);

    let message = if let Some(html) = &email.html_body {
        // Multipart alternative: text + HTML
        builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(email.body.clone()))
                    .singlepart(SinglePart::html(html.clone())),
            )
            .map_err(|e| MailerError::BuildEmail(e.to_string()))?
    } else {
        builder
            .body(email.body.clone())
            .map_err(|e| MailerError::BuildEmail(e.to_string()))?
    };

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> Mailbox {
        "Agentwaala <noreply@agentwaala.in>".parse().unwrap()
    }

    #[test]
    fn test_build_multipart_message() {
        let email = Email::new("ravi@example.in", "Hello", "text body").with_html("<p>html</p>");
        let message = build_message(&sender(), &email).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("To: ravi@example.in"));
        assert!(raw.contains("Subject: Hello"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text body"));
    }

    #[test]
    fn test_invalid_recipient() {
        let email = Email::new("not an address", "Hello", "body");
        assert!(matches!(
            build_message(&sender(), &email),
            Err(MailerError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn test_notify_rejects_bad_payload_before_sending() {
        let mailer = SmtpMailer::new(MailerConfig::new(
            "smtp.invalid",
            587,
            "noreply@agentwaala.in",
            "secret",
        ))
        .unwrap();

        let mut notification = LifecycleNotification::rejected("x@example.in", "Ravi", "reason");
        notification.rejection_reason = None;

        let result = mailer.notify(&notification).await;
        assert!(matches!(result, Err(NotifyError::Invalid(_))));
        assert_eq!(mailer.name(), "smtp");
    }
}
