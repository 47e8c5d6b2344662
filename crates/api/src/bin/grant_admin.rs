//! Grant the administrator role to an existing identity.
//!
//! Admins cannot be chosen at onboarding, so operators assign them here.

use clap::Parser;
use database::{role, Database};
use marketplace_core::Role;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "grant-admin", about = "Make a user an Agentwaala administrator")]
struct Args {
    /// Identity-provider user ID (the token's `sub` claim)
    #[arg(long)]
    user_id: String,

    /// SQLite database URL
    #[arg(long, env = "SQLITE_PATH", default_value = "sqlite:agentwaala.db?mode=rwc")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let db = Database::connect(&args.database_url).await?;
    db.migrate().await?;

    if let Some(existing) = role::get_role(db.pool(), &args.user_id).await? {
        return Err(format!("user {} already has the {} role", args.user_id, existing).into());
    }

    role::assign_role(db.pool(), &args.user_id, Role::Admin).await?;
    info!(user_id = %args.user_id, "Granted admin role");

    db.close().await;
    Ok(())
}
