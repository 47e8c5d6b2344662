//! Database error types.

use marketplace_core::DomainError;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Record already exists
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// The row changed between read and write.
    #[error("{entity} was modified concurrently: {id}")]
    Conflict { entity: &'static str, id: String },

    /// A marketplace rule refused the change.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input rejected before reaching the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DatabaseError {
    /// Map unique-constraint violations to `AlreadyExists`.
    pub(crate) fn on_unique(entity: &'static str, id: impl Into<String>) -> impl FnOnce(sqlx::Error) -> Self {
        let id = id.into();
        move |e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DatabaseError::AlreadyExists { entity, id };
                }
            }
            DatabaseError::Sqlx(e)
        }
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
