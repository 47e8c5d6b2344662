//! User contact details.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::Profile;
use crate::validation::{validate_email, validate_length, validate_phone, MAX_SHORT_TEXT_LENGTH};
use crate::Result;

/// Get a user's profile.
pub async fn get_profile(pool: &SqlitePool, user_id: &str) -> Result<Option<Profile>> {
    let record = sqlx::query_as::<_, Profile>(
        r#"
        SELECT user_id, full_name, email, phone, created_at, updated_at
        FROM profiles
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Create or replace a user's contact details.
///
/// `None` leaves the stored value untouched.
pub async fn upsert_profile(
    pool: &SqlitePool,
    user_id: &str,
    full_name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<()> {
    let mut conn = pool.acquire().await?;
    write_profile(&mut conn, user_id, full_name, email, phone).await
}

pub(crate) async fn write_profile(
    conn: &mut SqliteConnection,
    user_id: &str,
    full_name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<()> {
    if let Some(name) = full_name {
        validate_length("full name", name, MAX_SHORT_TEXT_LENGTH)?;
    }
    if let Some(email) = email {
        validate_email(email)?;
    }
    if let Some(phone) = phone {
        validate_phone(phone)?;
    }

    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, full_name, email, phone, created_at, updated_at)
        VALUES (?, COALESCE(?, ''), ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            full_name = COALESCE(?, profiles.full_name),
            email = COALESCE(excluded.email, profiles.email),
            phone = COALESCE(excluded.phone, profiles.phone),
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_id)
    .bind(full_name.map(str::trim))
    .bind(email.map(str::trim))
    .bind(phone.map(str::trim))
    .bind(now)
    .bind(now)
    .bind(full_name.map(str::trim))
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// The email lifecycle notifications go to.
pub async fn registered_email(pool: &SqlitePool, user_id: &str) -> Result<Option<String>> {
    let email = sqlx::query_scalar::<_, Option<String>>(
        r#"
        SELECT email
        FROM profiles
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(email.flatten())
}
