//! First-time role selection.

use marketplace_core::Role;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::Agent;
use crate::validation::validate_email;
use crate::{agent, profile, role};

/// Record a user's chosen role, their sign-in email, and (for agents) the
/// empty listing, all in one transaction.
///
/// An email that fails validation is left out rather than failing the whole
/// onboarding. Returns the new listing for agents.
pub async fn onboard(
    pool: &SqlitePool,
    user_id: &str,
    chosen: Role,
    email: Option<&str>,
) -> Result<Option<Agent>> {
    let email = email.filter(|email| match validate_email(email) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Ignoring unusable sign-in email");
            false
        }
    });

    let mut tx = pool.begin().await?;

    role::insert_role(&mut *tx, user_id, chosen).await?;
    profile::write_profile(&mut *tx, user_id, None, email, None).await?;
    let agent_id = match chosen {
        Role::Agent => Some(agent::insert_shell(&mut *tx, user_id).await?),
        _ => None,
    };

    tx.commit().await?;

    match agent_id {
        Some(id) => Ok(Some(agent::get_agent(pool, &id).await?)),
        None => Ok(None),
    }
}
