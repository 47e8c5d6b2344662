//! Call records.

use chrono::Utc;
use marketplace_core::{CallStatus, ContactRequest};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::Call;
use crate::validation::{validate_length, MAX_LONG_TEXT_LENGTH, MAX_SHORT_TEXT_LENGTH};

const CALL_COLUMNS: &str = "id, customer_id, agent_id, status, scheduled_at, duration_seconds, \
     category, notes, created_at, updated_at";

/// Fields for a new call.
#[derive(Debug, Clone)]
pub struct NewCall<'a> {
    pub customer_id: &'a str,
    pub agent_id: &'a str,
    pub request: ContactRequest,
    pub category: Option<&'a str>,
    pub notes: Option<&'a str>,
}

/// Record a call. Immediate calls start `ongoing`; scheduled ones must be
/// in the future.
pub async fn create_call(pool: &SqlitePool, call: NewCall<'_>) -> Result<Call> {
    if let Some(category) = call.category {
        validate_length("category", category, MAX_SHORT_TEXT_LENGTH)?;
    }
    if let Some(notes) = call.notes {
        validate_length("notes", notes, MAX_LONG_TEXT_LENGTH)?;
    }

    let now = Utc::now();
    let status = call.request.initial_status(now)?;
    let scheduled_at = match call.request {
        ContactRequest::Scheduled(at) => Some(at),
        ContactRequest::Immediate => None,
    };
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO calls (id, customer_id, agent_id, status, scheduled_at, category, notes, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(call.customer_id)
    .bind(call.agent_id)
    .bind(status)
    .bind(scheduled_at)
    .bind(call.category.map(str::trim).filter(|c| !c.is_empty()))
    .bind(call.notes.map(str::trim).filter(|n| !n.is_empty()))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    tracing::info!(
        call_id = %id,
        agent_id = %call.agent_id,
        status = %status,
        "Created call"
    );
    get_call(pool, &id).await
}

/// Get a call by ID.
pub async fn get_call(pool: &SqlitePool, id: &str) -> Result<Call> {
    let query = format!("SELECT {} FROM calls WHERE id = ?", CALL_COLUMNS);
    sqlx::query_as::<_, Call>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Call",
            id: id.to_string(),
        })
}

/// Move a call along its status graph.
///
/// The write only lands if the status is still the one the transition was
/// checked against; otherwise `Conflict`.
pub async fn update_call_status(
    pool: &SqlitePool,
    id: &str,
    next: CallStatus,
    duration_seconds: Option<i64>,
) -> Result<Call> {
    let call = get_call(pool, id).await?;
    let next = call.status.transition(next)?;
    let duration = match next {
        CallStatus::Completed => duration_seconds.map(|d| d.max(0)),
        _ => None,
    };

    let result = sqlx::query(
        r#"
        UPDATE calls
        SET status = ?, duration_seconds = COALESCE(?, duration_seconds), updated_at = ?
        WHERE id = ? AND status = ?
        "#,
    )
    .bind(next)
    .bind(duration)
    .bind(Utc::now())
    .bind(id)
    .bind(call.status)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        tracing::warn!(call_id = %id, from = %call.status, to = %next, "Call status changed concurrently");
        return Err(DatabaseError::Conflict {
            entity: "Call",
            id: id.to_string(),
        });
    }

    tracing::info!(call_id = %id, from = %call.status, to = %next, "Updated call status");
    get_call(pool, id).await
}

/// Calls placed by a customer, newest first.
pub async fn list_for_customer(pool: &SqlitePool, customer_id: &str) -> Result<Vec<Call>> {
    let query = format!(
        "SELECT {} FROM calls WHERE customer_id = ? ORDER BY created_at DESC",
        CALL_COLUMNS
    );
    let calls = sqlx::query_as::<_, Call>(&query)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;

    Ok(calls)
}

/// Calls received by an agent listing, newest first.
pub async fn list_for_agent(pool: &SqlitePool, agent_id: &str) -> Result<Vec<Call>> {
    let query = format!(
        "SELECT {} FROM calls WHERE agent_id = ? ORDER BY created_at DESC",
        CALL_COLUMNS
    );
    let calls = sqlx::query_as::<_, Call>(&query)
        .bind(agent_id)
        .fetch_all(pool)
        .await?;

    Ok(calls)
}

/// Whether the customer has ever called the agent.
pub async fn has_call_between(pool: &SqlitePool, customer_id: &str, agent_id: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM calls WHERE customer_id = ? AND agent_id = ?
        )
        "#,
    )
    .bind(customer_id)
    .bind(agent_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_agent, seed_customer, test_db};
    use chrono::Duration;
    use marketplace_core::DomainError;

    fn immediate<'a>(customer_id: &'a str, agent_id: &'a str) -> NewCall<'a> {
        NewCall {
            customer_id,
            agent_id,
            request: ContactRequest::Immediate,
            category: Some("real-estate"),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_immediate_call_is_ongoing() {
        let db = test_db().await;
        let agent = seed_agent(&db, "agent-owner").await;
        seed_customer(&db, "customer-1").await;

        let call = create_call(db.pool(), immediate("customer-1", &agent.id))
            .await
            .unwrap();
        assert_eq!(call.status, CallStatus::Ongoing);
        assert!(call.scheduled_at.is_none());
        assert_eq!(call.category.as_deref(), Some("real-estate"));
    }

    #[tokio::test]
    async fn test_scheduled_call_needs_future_time() {
        let db = test_db().await;
        let agent = seed_agent(&db, "agent-owner").await;
        seed_customer(&db, "customer-1").await;

        let past = NewCall {
            request: ContactRequest::Scheduled(Utc::now() - Duration::hours(1)),
            ..immediate("customer-1", &agent.id)
        };
        let result = create_call(db.pool(), past).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Domain(DomainError::ScheduleInPast))
        ));

        let later = Utc::now() + Duration::hours(2);
        let future = NewCall {
            request: ContactRequest::Scheduled(later),
            ..immediate("customer-1", &agent.id)
        };
        let call = create_call(db.pool(), future).await.unwrap();
        assert_eq!(call.status, CallStatus::Scheduled);
        assert!(call.scheduled_at.is_some());
    }

    #[tokio::test]
    async fn test_call_requires_existing_agent() {
        let db = test_db().await;
        seed_customer(&db, "customer-1").await;

        let result = create_call(db.pool(), immediate("customer-1", "missing-agent")).await;
        assert!(matches!(result, Err(DatabaseError::Sqlx(_))));
    }

    #[tokio::test]
    async fn test_status_follows_graph() {
        let db = test_db().await;
        let agent = seed_agent(&db, "agent-owner").await;
        seed_customer(&db, "customer-1").await;
        let call = create_call(db.pool(), immediate("customer-1", &agent.id))
            .await
            .unwrap();

        let completed = update_call_status(db.pool(), &call.id, CallStatus::Completed, Some(300))
            .await
            .unwrap();
        assert_eq!(completed.status, CallStatus::Completed);
        assert_eq!(completed.duration_seconds, Some(300));

        let reopened = update_call_status(db.pool(), &call.id, CallStatus::Ongoing, None).await;
        assert!(matches!(
            reopened,
            Err(DatabaseError::Domain(DomainError::InvalidCallTransition { .. }))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_call_ignores_duration() {
        let db = test_db().await;
        let agent = seed_agent(&db, "agent-owner").await;
        seed_customer(&db, "customer-1").await;
        let call = create_call(db.pool(), immediate("customer-1", &agent.id))
            .await
            .unwrap();

        let cancelled = update_call_status(db.pool(), &call.id, CallStatus::Cancelled, Some(60))
            .await
            .unwrap();
        assert_eq!(cancelled.status, CallStatus::Cancelled);
        assert_eq!(cancelled.duration_seconds, None);
    }

    #[tokio::test]
    async fn test_lists_and_history() {
        let db = test_db().await;
        let agent = seed_agent(&db, "agent-owner").await;
        seed_customer(&db, "customer-1").await;
        seed_customer(&db, "customer-2").await;

        assert!(!has_call_between(db.pool(), "customer-1", &agent.id).await.unwrap());

        create_call(db.pool(), immediate("customer-1", &agent.id))
            .await
            .unwrap();
        create_call(db.pool(), immediate("customer-1", &agent.id))
            .await
            .unwrap();

        assert!(has_call_between(db.pool(), "customer-1", &agent.id).await.unwrap());
        assert!(!has_call_between(db.pool(), "customer-2", &agent.id).await.unwrap());
        assert_eq!(list_for_customer(db.pool(), "customer-1").await.unwrap().len(), 2);
        assert!(list_for_customer(db.pool(), "customer-2").await.unwrap().is_empty());
        assert_eq!(list_for_agent(db.pool(), &agent.id).await.unwrap().len(), 2);
    }
}
