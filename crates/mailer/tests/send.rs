//! Live send against a real relay.
//!
//! Run with `cargo test -p mailer -- --ignored` after setting `SMTP_*`
//! variables and `MAILER_TEST_TO`.

use mailer::{MailerConfig, SmtpMailer};
use marketplace_core::{LifecycleNotification, Notifier};

#[tokio::test]
#[ignore]
async fn test_send_approved_notification() {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let to = std::env::var("MAILER_TEST_TO").expect("MAILER_TEST_TO not set");
    let mailer = SmtpMailer::new(MailerConfig::from_env().unwrap()).unwrap();

    mailer
        .notify(&LifecycleNotification::approved(to, "Test Agent"))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn test_send_rejected_notification() {
    dotenvy::dotenv().ok();

    let to = std::env::var("MAILER_TEST_TO").expect("MAILER_TEST_TO not set");
    let mailer = SmtpMailer::new(MailerConfig::from_env().unwrap()).unwrap();

    mailer
        .notify(&LifecycleNotification::rejected(
            to,
            "Test Agent",
            "Profile photo missing",
        ))
        .await
        .unwrap();
}
