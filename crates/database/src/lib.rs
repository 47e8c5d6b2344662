//! SQLite persistence layer for Agentwaala.
//!
//! This crate provides async database operations for agent listings, calls,
//! reviews, profiles, and role assignments using SQLx with SQLite. Marketplace
//! rules live in `marketplace-core`; this crate stores their outcomes.
//!
//! # Example
//!
//! ```no_run
//! use database::{onboarding, Database};
//! use marketplace_core::Role;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:agentwaala.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Onboard an agent
//!     let listing = onboarding::onboard(db.pool(), "user-123", Role::Agent, None).await?;
//!     if let Some(listing) = listing {
//!         println!("created listing {}", listing.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod call;
pub mod error;
pub mod models;
pub mod onboarding;
pub mod profile;
pub mod review;
pub mod role;
pub mod validation;

pub use agent::AgentProfileUpdate;
pub use call::NewCall;
pub use error::{DatabaseError, Result};
pub use models::{Agent, Call, Profile, Review, UserRole};
pub use validation::ValidationError;

/// JSON column wrapper used by [`Agent::categories`].
pub use sqlx::types::Json;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/agentwaala.db?mode=rwc").await?;
    ///
    /// // In-memory database (single connection, for testing)
    /// let db = database::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use marketplace_core::Role;

    /// Fresh migrated in-memory database.
    ///
    /// One connection, since every `sqlite::memory:` connection is its own
    /// database.
    pub async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    /// An agent user with an empty listing.
    pub async fn seed_agent(db: &Database, owner_id: &str) -> Agent {
        role::assign_role(db.pool(), owner_id, Role::Agent)
            .await
            .unwrap();
        agent::create_agent_shell(db.pool(), owner_id).await.unwrap()
    }

    pub async fn seed_customer(db: &Database, user_id: &str) {
        role::assign_role(db.pool(), user_id, Role::Customer)
            .await
            .unwrap();
    }

    /// Profile fields that satisfy every completeness rule.
    pub fn complete_profile(name: &str) -> AgentProfileUpdate {
        AgentProfileUpdate {
            name: name.to_string(),
            phone: "9876543210".to_string(),
            categories: vec!["real-estate".to_string()],
            state: "Karnataka".to_string(),
            city: "Bengaluru".to_string(),
            area: "Indiranagar".to_string(),
            postal_code: "560038".to_string(),
            description: "Residential rentals and sales".to_string(),
            offers: String::new(),
        }
    }
}
