//! Agentwaala API server.

use std::sync::Arc;

use api::{AppState, AvatarStore, Config, DisabledNotifier, TokenVerifier};
use database::Database;
use geocoder::ReverseGeocoder;
use mailer::SmtpMailer;
use marketplace_core::Notifier;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting Agentwaala API");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let notifier: Arc<dyn Notifier> = match config.mailer.clone() {
        Some(mailer_config) => {
            let mailer = SmtpMailer::new(mailer_config)?;
            info!("Lifecycle email enabled");
            Arc::new(mailer)
        }
        None => {
            warn!("SMTP_HOST not set; approval and rejection emails will not be sent");
            Arc::new(DisabledNotifier)
        }
    };

    let geocoder = ReverseGeocoder::new(config.geocoder.clone())?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let avatars = AvatarStore::new(&config.upload_dir);

    // Build application state
    let state = AppState::new(
        db,
        notifier,
        geocoder,
        TokenVerifier::new(&config.jwt_secret),
        avatars,
    );

    // Start server
    let app = api::app(state);
    info!(addr = %config.addr, "API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
