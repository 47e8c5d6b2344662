//! Star reviews and the per-agent rating aggregate.

use std::collections::HashMap;

use chrono::Utc;
use marketplace_core::{DomainError, RatingSummary, Stars};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::call::has_call_between;
use crate::error::Result;
use crate::models::Review;

/// Create or overwrite a customer's rating of an agent.
///
/// The review row and the agent's aggregate are written in one transaction.
/// Returns the aggregate after the write.
pub async fn upsert_review(
    pool: &SqlitePool,
    customer_id: &str,
    agent_id: &str,
    stars: Stars,
) -> Result<RatingSummary> {
    if !has_call_between(pool, customer_id, agent_id).await? {
        return Err(DomainError::ReviewWithoutCall.into());
    }

    let mut tx = pool.begin().await?;

    let previous = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT stars
        FROM reviews
        WHERE customer_id = ? AND agent_id = ?
        "#,
    )
    .bind(customer_id)
    .bind(agent_id)
    .fetch_optional(&mut *tx)
    .await?
    .map(Stars::new)
    .transpose()?;

    let summary = read_summary(&mut *tx, agent_id)
        .await?
        .with_upsert(previous, stars);
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO reviews (customer_id, agent_id, stars, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(customer_id, agent_id) DO UPDATE SET
            stars = excluded.stars,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(customer_id)
    .bind(agent_id)
    .bind(i64::from(stars))
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO agent_ratings (agent_id, review_count, star_sum)
        VALUES (?, ?, ?)
        ON CONFLICT(agent_id) DO UPDATE SET
            review_count = excluded.review_count,
            star_sum = excluded.star_sum
        "#,
    )
    .bind(agent_id)
    .bind(summary.count as i64)
    .bind(summary.sum as i64)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        agent_id = %agent_id,
        stars = stars.get(),
        updated = previous.is_some(),
        review_count = summary.count,
        "Saved review"
    );
    Ok(summary)
}

/// Rating aggregate for one agent. Zero when never reviewed.
pub async fn get_rating(pool: &SqlitePool, agent_id: &str) -> Result<RatingSummary> {
    let mut conn = pool.acquire().await?;
    read_summary(&mut *conn, agent_id).await
}

/// Rating aggregates for a batch of agents, keyed by agent ID.
///
/// Agents without reviews are absent from the map.
pub async fn ratings_for(
    pool: &SqlitePool,
    agent_ids: &[String],
) -> Result<HashMap<String, RatingSummary>> {
    if agent_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
        "SELECT agent_id, review_count, star_sum FROM agent_ratings WHERE agent_id IN (",
    );
    let mut ids = qb.separated(", ");
    for id in agent_ids {
        ids.push_bind(id.as_str());
    }
    ids.push_unseparated(")");

    let rows = qb
        .build_query_as::<(String, i64, i64)>()
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, count, sum)| (id, summary_from_row(count, sum)))
        .collect())
}

/// A customer's own review of an agent.
pub async fn get_review(
    pool: &SqlitePool,
    customer_id: &str,
    agent_id: &str,
) -> Result<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(
        r#"
        SELECT customer_id, agent_id, stars, created_at, updated_at
        FROM reviews
        WHERE customer_id = ? AND agent_id = ?
        "#,
    )
    .bind(customer_id)
    .bind(agent_id)
    .fetch_optional(pool)
    .await?;

    Ok(review)
}

/// All reviews of an agent, most recent first.
pub async fn list_reviews_for_agent(pool: &SqlitePool, agent_id: &str) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        r#"
        SELECT customer_id, agent_id, stars, created_at, updated_at
        FROM reviews
        WHERE agent_id = ?
        ORDER BY updated_at DESC
        "#,
    )
    .bind(agent_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

async fn read_summary(conn: &mut SqliteConnection, agent_id: &str) -> Result<RatingSummary> {
    let row = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT review_count, star_sum
        FROM agent_ratings
        WHERE agent_id = ?
        "#,
    )
    .bind(agent_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row
        .map(|(count, sum)| summary_from_row(count, sum))
        .unwrap_or_default())
}

fn summary_from_row(count: i64, sum: i64) -> RatingSummary {
    RatingSummary {
        count: u32::try_from(count).unwrap_or(0),
        sum: u32::try_from(sum).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::{create_call, NewCall};
    use crate::test_support::{seed_agent, seed_customer, test_db};
    use crate::DatabaseError;
    use marketplace_core::ContactRequest;

    fn stars(value: i64) -> Stars {
        Stars::new(value).unwrap()
    }

    async fn call(db: &crate::Database, customer_id: &str, agent_id: &str) {
        create_call(
            db.pool(),
            NewCall {
                customer_id,
                agent_id,
                request: ContactRequest::Immediate,
                category: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_review_requires_prior_call() {
        let db = test_db().await;
        let agent = seed_agent(&db, "agent-owner").await;
        seed_customer(&db, "customer-1").await;

        let result = upsert_review(db.pool(), "customer-1", &agent.id, stars(5)).await;
        assert!(matches!(
            result,
            Err(DatabaseError::Domain(DomainError::ReviewWithoutCall))
        ));
        assert!(!get_rating(db.pool(), &agent.id).await.unwrap().has_reviews());
    }

    #[tokio::test]
    async fn test_overwrite_keeps_count() {
        let db = test_db().await;
        let agent = seed_agent(&db, "agent-owner").await;
        seed_customer(&db, "customer-1").await;
        call(&db, "customer-1", &agent.id).await;

        let first = upsert_review(db.pool(), "customer-1", &agent.id, stars(2))
            .await
            .unwrap();
        assert_eq!(first, RatingSummary { count: 1, sum: 2 });

        let second = upsert_review(db.pool(), "customer-1", &agent.id, stars(5))
            .await
            .unwrap();
        assert_eq!(second, RatingSummary { count: 1, sum: 5 });
        assert_eq!(get_rating(db.pool(), &agent.id).await.unwrap(), second);

        let review = get_review(db.pool(), "customer-1", &agent.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(review.stars().unwrap(), stars(5));
    }

    #[tokio::test]
    async fn test_average_across_customers() {
        let db = test_db().await;
        let agent = seed_agent(&db, "agent-owner").await;

        for (customer, value) in [("c1", 5), ("c2", 4), ("c3", 4)] {
            seed_customer(&db, customer).await;
            call(&db, customer, &agent.id).await;
            upsert_review(db.pool(), customer, &agent.id, stars(value))
                .await
                .unwrap();
        }

        let summary = get_rating(db.pool(), &agent.id).await.unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average(), 4.3);
        assert_eq!(list_reviews_for_agent(db.pool(), &agent.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_ratings_for_batch() {
        let db = test_db().await;
        let reviewed = seed_agent(&db, "owner-1").await;
        let unreviewed = seed_agent(&db, "owner-2").await;
        seed_customer(&db, "customer-1").await;
        call(&db, "customer-1", &reviewed.id).await;
        upsert_review(db.pool(), "customer-1", &reviewed.id, stars(3))
            .await
            .unwrap();

        let ratings = ratings_for(db.pool(), &[reviewed.id.clone(), unreviewed.id.clone()])
            .await
            .unwrap();
        assert_eq!(ratings.get(&reviewed.id), Some(&RatingSummary { count: 1, sum: 3 }));
        assert!(!ratings.contains_key(&unreviewed.id));

        assert!(ratings_for(db.pool(), &[]).await.unwrap().is_empty());
    }
}
