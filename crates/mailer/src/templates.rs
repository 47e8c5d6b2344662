//! Approved / rejected email bodies.

use marketplace_core::{LifecycleNotification, NotificationKind};

use crate::{Email, MailerError};

const SIGN_OFF: &str = "The Agentwaala team";

/// Compose the email for a lifecycle notification.
pub fn render(notification: &LifecycleNotification) -> Result<Email, MailerError> {
    let to = notification.agent_email.trim();
    if to.is_empty() {
        return Err(MailerError::InvalidNotification(
            "agent email is empty".to_string(),
        ));
    }

    let name = match notification.agent_name.trim() {
        "" => "there",
        name => name,
    };

    match notification.kind {
        NotificationKind::Approved => Ok(approved(to, name)),
        NotificationKind::Rejected => {
            let reason = notification
                .rejection_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| {
                    MailerError::InvalidNotification("rejection reason is missing".to_string())
                })?;
            Ok(rejected(to, name, reason))
        }
    }
}

fn approved(to: &str, name: &str) -> Email {
    let body = format!(
        "Hi {name},\n\n\
         Your Agentwaala agent profile has been verified. Customers can now find \
         you in listings and contact you.\n\n\
         Switch your availability on whenever you are ready to take calls.\n\n\
         {SIGN_OFF}\n"
    );

    let html = layout(
        "You're verified",
        &format!(
            "<p>Hi {},</p>\
             <p>Your Agentwaala agent profile has been <strong>verified</strong>. \
             Customers can now find you in listings and contact you.</p>\
             <p>Switch your availability on whenever you are ready to take calls.</p>",
            escape_html(name)
        ),
    );

    Email::new(to, "Your Agentwaala profile is verified", body).with_html(html)
}

fn rejected(to: &str, name: &str, reason: &str) -> Email {
    let body = format!(
        "Hi {name},\n\n\
         We could not approve your Agentwaala agent profile.\n\n\
         Reason: {reason}\n\n\
         Update your profile and submit it for review again from your dashboard.\n\n\
         {SIGN_OFF}\n"
    );

    let html = layout(
        "Application update",
        &format!(
            "<p>Hi {},</p>\
             <p>We could not approve your Agentwaala agent profile.</p>\
             <blockquote>{}</blockquote>\
             <p>Update your profile and submit it for review again from your dashboard.</p>",
            escape_html(name),
            escape_html(reason)
        ),
    );

    Email::new(to, "Update on your Agentwaala application", body).with_html(html)
}

fn layout(heading: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\
         <html><body style=\"font-family: sans-serif; color: #1f2937;\">\
         <h2>{heading}</h2>{content}<p>{SIGN_OFF}</p>\
         </body></html>"
    )
}

/// Escape text interpolated into HTML.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
