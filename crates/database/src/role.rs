//! Role assignments.

use chrono::Utc;
use marketplace_core::Role;
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::{DatabaseError, Result};
use crate::models::UserRole;

/// Assign a role to a user. Fails with `AlreadyExists` if one is set.
pub async fn assign_role(pool: &SqlitePool, user_id: &str, role: Role) -> Result<UserRole> {
    let mut conn = pool.acquire().await?;
    insert_role(&mut conn, user_id, role).await
}

pub(crate) async fn insert_role(
    conn: &mut SqliteConnection,
    user_id: &str,
    role: Role,
) -> Result<UserRole> {
    let assignment = UserRole {
        user_id: user_id.to_string(),
        role,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&assignment.user_id)
    .bind(assignment.role)
    .bind(assignment.created_at)
    .execute(&mut *conn)
    .await
    .map_err(DatabaseError::on_unique("Role", user_id))?;

    tracing::info!(user_id = %user_id, role = %role, "Assigned role");
    Ok(assignment)
}

/// Get a user's role, if one has been assigned.
pub async fn get_role(pool: &SqlitePool, user_id: &str) -> Result<Option<Role>> {
    let role = sqlx::query_scalar::<_, Role>(
        r#"
        SELECT role
        FROM user_roles
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(role)
}

/// Count users grouped by role.
pub async fn count_by_role(pool: &SqlitePool) -> Result<Vec<(Role, i64)>> {
    let rows = sqlx::query_as::<_, (Role, i64)>(
        r#"
        SELECT role, COUNT(*) as count
        FROM user_roles
        GROUP BY role
        ORDER BY count DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
