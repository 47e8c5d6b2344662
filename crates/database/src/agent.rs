//! Agent listing storage.

use std::collections::HashMap;

use chrono::Utc;
use marketplace_core::{
    is_profile_complete, listing_order, LifecycleState, ListingFilter, RequiredFields, Standing,
    PUBLIC_LISTING,
};
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::Agent;
use crate::validation::{
    validate_categories, validate_length, validate_phone, validate_postal_code, ValidationError,
    MAX_LONG_TEXT_LENGTH, MAX_REASON_LENGTH, MAX_SHORT_TEXT_LENGTH,
};

const AGENT_COLUMNS: &str = "id, owner_id, name, phone, avatar_path, categories, state, city, \
     area, postal_code, description, offers, available, profile_complete, review_status, \
     premium, rejection_reason, rejected_at, created_at, updated_at";

/// Editable listing fields, as submitted by the owning agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentProfileUpdate {
    pub name: String,
    pub phone: String,
    pub categories: Vec<String>,
    pub state: String,
    pub city: String,
    pub area: String,
    pub postal_code: String,
    pub description: String,
    pub offers: String,
}

impl AgentProfileUpdate {
    /// Trim text and drop blank or duplicate categories.
    pub fn normalized(self) -> Self {
        let mut categories: Vec<String> = Vec::with_capacity(self.categories.len());
        for category in self.categories {
            let category = category.trim().to_string();
            if !category.is_empty() && !categories.contains(&category) {
                categories.push(category);
            }
        }

        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            categories,
            state: self.state.trim().to_string(),
            city: self.city.trim().to_string(),
            area: self.area.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            description: self.description.trim().to_string(),
            offers: self.offers.trim().to_string(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("state", &self.state),
            ("city", &self.city),
            ("area", &self.area),
        ] {
            validate_length(field, value, MAX_SHORT_TEXT_LENGTH)?;
        }
        validate_length("description", &self.description, MAX_LONG_TEXT_LENGTH)?;
        validate_length("offers", &self.offers, MAX_LONG_TEXT_LENGTH)?;
        validate_phone(&self.phone)?;
        validate_postal_code(&self.postal_code)?;
        validate_categories(&self.categories)?;
        Ok(())
    }

    pub fn required_fields(&self) -> RequiredFields<'_> {
        RequiredFields {
            name: &self.name,
            phone: &self.phone,
            state: &self.state,
            city: &self.city,
            categories: &self.categories,
        }
    }
}

/// Create the empty listing for a user who picked the agent role.
pub async fn create_agent_shell(pool: &SqlitePool, owner_id: &str) -> Result<Agent> {
    let id = {
        let mut conn = pool.acquire().await?;
        insert_shell(&mut conn, owner_id).await?
    };
    get_agent(pool, &id).await
}

/// Insert an empty listing and return its ID.
pub(crate) async fn insert_shell(conn: &mut SqliteConnection, owner_id: &str) -> Result<String> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO agents (id, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(owner_id)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await
    .map_err(DatabaseError::on_unique("Agent", owner_id))?;

    tracing::info!(agent_id = %id, owner_id = %owner_id, "Created agent shell");
    Ok(id)
}

/// Get an agent by listing ID.
pub async fn get_agent(pool: &SqlitePool, id: &str) -> Result<Agent> {
    let query = format!("SELECT {} FROM agents WHERE id = ?", AGENT_COLUMNS);
    sqlx::query_as::<_, Agent>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Agent",
            id: id.to_string(),
        })
}

/// Get the agent listing owned by a user.
pub async fn get_agent_by_owner(pool: &SqlitePool, owner_id: &str) -> Result<Agent> {
    let query = format!("SELECT {} FROM agents WHERE owner_id = ?", AGENT_COLUMNS);
    sqlx::query_as::<_, Agent>(&query)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Agent",
            id: owner_id.to_string(),
        })
}

/// Save the owner's profile edits and recompute completeness.
///
/// An edit that leaves required fields blank also takes the agent offline.
pub async fn update_profile(
    pool: &SqlitePool,
    owner_id: &str,
    update: AgentProfileUpdate,
) -> Result<Agent> {
    let update = update.normalized();
    update.validate()?;

    let agent = get_agent_by_owner(pool, owner_id).await?;
    let complete = is_profile_complete(&update.required_fields());

    sqlx::query(
        r#"
        UPDATE agents
        SET name = ?, phone = ?, categories = ?, state = ?, city = ?, area = ?,
            postal_code = ?, description = ?, offers = ?,
            profile_complete = ?, available = (available AND ?), updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&update.name)
    .bind(&update.phone)
    .bind(Json(&update.categories))
    .bind(&update.state)
    .bind(&update.city)
    .bind(&update.area)
    .bind(&update.postal_code)
    .bind(&update.description)
    .bind(&update.offers)
    .bind(complete)
    .bind(complete)
    .bind(Utc::now())
    .bind(&agent.id)
    .execute(pool)
    .await?;

    if complete != agent.profile_complete {
        tracing::info!(
            agent_id = %agent.id,
            profile_complete = complete,
            "Agent profile completeness changed"
        );
    }

    get_agent(pool, &agent.id).await
}

/// Persist a lifecycle transition in one statement.
///
/// `current` is the record the transition was decided from. The write only
/// lands if the stored standing still matches it; a profile edit or another
/// action in between gives `Conflict`. Rejection fields are written together
/// so a restore clears all of them.
pub async fn save_standing(pool: &SqlitePool, current: &Agent, next: &Standing) -> Result<Agent> {
    let (reason, rejected_at) = match &next.rejection {
        Some(rejection) => (Some(rejection.reason.as_str()), Some(rejection.at)),
        None => (None, None),
    };
    if let Some(reason) = reason {
        validate_length("rejection reason", reason, MAX_REASON_LENGTH)?;
    }

    let result = sqlx::query(
        r#"
        UPDATE agents
        SET review_status = ?, premium = ?, available = ?,
            rejection_reason = ?, rejected_at = ?, updated_at = ?
        WHERE id = ?
          AND profile_complete = ? AND review_status = ? AND premium = ? AND available = ?
        "#,
    )
    .bind(next.review_status)
    .bind(next.premium)
    .bind(next.available)
    .bind(reason)
    .bind(rejected_at)
    .bind(Utc::now())
    .bind(&current.id)
    .bind(current.profile_complete)
    .bind(current.review_status)
    .bind(current.premium)
    .bind(current.available)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        // Distinguish a vanished row from a stale read
        get_agent(pool, &current.id).await?;
        tracing::warn!(agent_id = %current.id, "Agent standing changed concurrently");
        return Err(DatabaseError::Conflict {
            entity: "Agent",
            id: current.id.clone(),
        });
    }

    get_agent(pool, &current.id).await
}

/// Point the agent's avatar at a stored image.
pub async fn set_avatar(pool: &SqlitePool, owner_id: &str, avatar_path: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE agents
        SET avatar_path = ?, updated_at = ?
        WHERE owner_id = ?
        "#,
    )
    .bind(avatar_path)
    .bind(Utc::now())
    .bind(owner_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Agent",
            id: owner_id.to_string(),
        });
    }

    Ok(())
}

/// Agents visible in public listings, best first.
pub async fn list_public(pool: &SqlitePool, filter: &ListingFilter) -> Result<Vec<Agent>> {
    let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
        "SELECT {} FROM agents WHERE profile_complete = ",
        AGENT_COLUMNS
    ));
    qb.push_bind(PUBLIC_LISTING.profile_complete);
    qb.push(" AND review_status = ");
    qb.push_bind(PUBLIC_LISTING.review_status);

    if let Some(state) = &filter.state {
        qb.push(" AND state = ");
        qb.push_bind(state.clone());
        qb.push(" COLLATE NOCASE");
    }
    if let Some(city) = &filter.city {
        qb.push(" AND city = ");
        qb.push_bind(city.clone());
        qb.push(" COLLATE NOCASE");
    }
    if let Some(area) = &filter.area {
        qb.push(" AND area LIKE ");
        qb.push_bind(format!("%{}%", like_escape(area)));
        qb.push(" ESCAPE '\\'");
    }
    if let Some(postal_code) = &filter.postal_code {
        qb.push(" AND postal_code LIKE ");
        qb.push_bind(format!("{}%", like_escape(postal_code)));
        qb.push(" ESCAPE '\\'");
    }
    if let Some(category) = &filter.category {
        qb.push(" AND EXISTS (SELECT 1 FROM json_each(agents.categories) WHERE json_each.value = ");
        qb.push_bind(category.clone());
        qb.push(" COLLATE NOCASE)");
    }
    if let Some(text) = &filter.q {
        let pattern = format!("%{}%", like_escape(text));
        qb.push(" AND (name LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR description LIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\')");
    }

    qb.push(" ORDER BY premium DESC, (review_status = 'verified') DESC, created_at DESC LIMIT ");
    qb.push_bind(filter.effective_limit() as i64);

    let mut agents: Vec<Agent> = qb
        .build_query_as::<Agent>()
        .fetch_all(pool)
        .await?
        .into_iter()
        .filter(|agent| agent.standing().is_publicly_visible())
        .collect();

    agents.sort_by(|a, b| listing_order(&a.listing_key(), &b.listing_key()));
    Ok(agents)
}

/// `Standing::lifecycle_state` as a column expression.
const LIFECYCLE_SQL: &str = "CASE \
     WHEN review_status = 'rejected' THEN 'rejected' \
     WHEN profile_complete = 0 THEN 'incomplete' \
     WHEN review_status = 'verified' THEN 'verified' \
     ELSE 'pending_review' END";

fn lifecycle_key(state: LifecycleState) -> &'static str {
    match state {
        LifecycleState::Incomplete => "incomplete",
        LifecycleState::PendingReview => "pending_review",
        LifecycleState::Verified => "verified",
        LifecycleState::Rejected => "rejected",
    }
}

fn lifecycle_from_key(key: &str) -> Option<LifecycleState> {
    match key {
        "incomplete" => Some(LifecycleState::Incomplete),
        "pending_review" => Some(LifecycleState::PendingReview),
        "verified" => Some(LifecycleState::Verified),
        "rejected" => Some(LifecycleState::Rejected),
        _ => None,
    }
}

/// Agents for the administrator, optionally narrowed to one lifecycle state.
///
/// Most recently updated first.
pub async fn list_by_lifecycle(
    pool: &SqlitePool,
    state: Option<LifecycleState>,
) -> Result<Vec<Agent>> {
    let mut qb: QueryBuilder<'_, Sqlite> =
        QueryBuilder::new(format!("SELECT {} FROM agents", AGENT_COLUMNS));
    if let Some(state) = state {
        qb.push(format!(" WHERE {} = ", LIFECYCLE_SQL));
        qb.push_bind(lifecycle_key(state));
    }
    qb.push(" ORDER BY updated_at DESC");

    let agents = qb.build_query_as::<Agent>().fetch_all(pool).await?;
    Ok(agents)
}

/// Number of agents in each lifecycle state, plus premium count.
pub async fn lifecycle_counts(pool: &SqlitePool) -> Result<(HashMap<LifecycleState, i64>, i64)> {
    let query = format!(
        "SELECT {} AS lifecycle, COUNT(*), COALESCE(SUM(premium), 0) FROM agents GROUP BY lifecycle",
        LIFECYCLE_SQL
    );
    let rows = sqlx::query_as::<_, (String, i64, i64)>(&query)
        .fetch_all(pool)
        .await?;

    let mut counts = HashMap::new();
    let mut premium = 0;
    for (key, count, premium_count) in rows {
        if let Some(state) = lifecycle_from_key(&key) {
            counts.insert(state, count);
        }
        premium += premium_count;
    }

    Ok((counts, premium))
}

/// Escape `%`, `_`, and `\` for a LIKE pattern using `\` as the escape.
fn like_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{complete_profile, seed_agent, test_db};
    use marketplace_core::{AdminAction, ReviewStatus};

    async fn verify(db: &crate::Database, agent: &Agent) -> Agent {
        let transition = agent
            .standing()
            .apply_admin(&AdminAction::Verify, Utc::now())
            .unwrap();
        save_standing(db.pool(), agent, &transition.standing)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_shell_starts_incomplete() {
        let db = test_db().await;
        let agent = seed_agent(&db, "owner-1").await;

        assert_eq!(agent.standing().lifecycle_state(), LifecycleState::Incomplete);
        assert!(agent.categories.is_empty());
        assert!(!agent.available);

        let duplicate = create_agent_shell(db.pool(), "owner-1").await;
        assert!(matches!(duplicate, Err(DatabaseError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_profile_save_recomputes_completeness() {
        let db = test_db().await;
        seed_agent(&db, "owner-1").await;

        let agent = update_profile(db.pool(), "owner-1", complete_profile("Ravi"))
            .await
            .unwrap();
        assert!(agent.profile_complete);
        assert_eq!(agent.standing().lifecycle_state(), LifecycleState::PendingReview);
        assert_eq!(agent.categories.0, vec!["real-estate".to_string()]);

        let mut partial = complete_profile("Ravi");
        partial.city = "  ".to_string();
        let agent = update_profile(db.pool(), "owner-1", partial).await.unwrap();
        assert!(!agent.profile_complete);
    }

    #[tokio::test]
    async fn test_incomplete_profile_goes_offline() {
        let db = test_db().await;
        seed_agent(&db, "owner-1").await;
        let agent = update_profile(db.pool(), "owner-1", complete_profile("Ravi"))
            .await
            .unwrap();

        let online = Standing {
            available: true,
            ..agent.standing()
        };
        save_standing(db.pool(), &agent, &online).await.unwrap();

        let mut partial = complete_profile("Ravi");
        partial.categories.clear();
        let agent = update_profile(db.pool(), "owner-1", partial).await.unwrap();
        assert!(!agent.available);
    }

    #[tokio::test]
    async fn test_stale_standing_is_not_saved() {
        let db = test_db().await;
        seed_agent(&db, "owner-1").await;
        let agent = update_profile(db.pool(), "owner-1", complete_profile("Ravi"))
            .await
            .unwrap();
        let online = Standing {
            available: true,
            ..agent.standing()
        };
        let seen_by_admin = save_standing(db.pool(), &agent, &online).await.unwrap();

        // The owner blanks a required field after the admin loaded the record
        let mut partial = complete_profile("Ravi");
        partial.categories.clear();
        update_profile(db.pool(), "owner-1", partial).await.unwrap();

        let premium = seen_by_admin
            .standing()
            .apply_admin(&AdminAction::SetPremium(true), Utc::now())
            .unwrap();
        let result = save_standing(db.pool(), &seen_by_admin, &premium.standing).await;
        assert!(matches!(result, Err(DatabaseError::Conflict { .. })));

        let stored = get_agent(db.pool(), &agent.id).await.unwrap();
        assert!(!stored.profile_complete);
        assert!(!stored.available);
        assert!(!stored.premium);

        let gone = Agent {
            id: "missing".to_string(),
            ..stored
        };
        let result = save_standing(db.pool(), &gone, &gone.standing()).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_profile_validates_input() {
        let db = test_db().await;
        seed_agent(&db, "owner-1").await;

        let mut bad = complete_profile("Ravi");
        bad.postal_code = "12".to_string();
        let result = update_profile(db.pool(), "owner-1", bad).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_public_listing_requires_verification() {
        let db = test_db().await;
        seed_agent(&db, "owner-1").await;
        let agent = update_profile(db.pool(), "owner-1", complete_profile("Ravi"))
            .await
            .unwrap();

        let listed = list_public(db.pool(), &ListingFilter::default()).await.unwrap();
        assert!(listed.is_empty());

        verify(&db, &agent).await;
        let listed = list_public(db.pool(), &ListingFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].review_status, ReviewStatus::Verified);
    }

    #[tokio::test]
    async fn test_rejected_agent_leaves_listing_and_restore_returns_to_queue() {
        let db = test_db().await;
        seed_agent(&db, "owner-1").await;
        let agent = update_profile(db.pool(), "owner-1", complete_profile("Ravi"))
            .await
            .unwrap();
        let agent = verify(&db, &agent).await;

        let rejected = agent
            .standing()
            .apply_admin(
                &AdminAction::Reject {
                    reason: "Fake documents".to_string(),
                },
                Utc::now(),
            )
            .unwrap();
        let agent = save_standing(db.pool(), &agent, &rejected.standing)
            .await
            .unwrap();
        assert_eq!(agent.rejection_reason.as_deref(), Some("Fake documents"));
        assert!(agent.rejected_at.is_some());
        assert!(list_public(db.pool(), &ListingFilter::default())
            .await
            .unwrap()
            .is_empty());

        let restored = agent
            .standing()
            .apply_admin(&AdminAction::Restore, Utc::now())
            .unwrap();
        let agent = save_standing(db.pool(), &agent, &restored.standing)
            .await
            .unwrap();
        assert!(agent.rejection_reason.is_none());
        assert!(agent.rejected_at.is_none());
        assert!(!agent.rejected());

        let pending = list_by_lifecycle(db.pool(), Some(LifecycleState::PendingReview))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert!(list_public(db.pool(), &ListingFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_premium_agent_sorts_first() {
        let db = test_db().await;

        let mut ids = Vec::new();
        for (owner, name) in [("owner-1", "Asha"), ("owner-2", "Ravi")] {
            seed_agent(&db, owner).await;
            let agent = update_profile(db.pool(), owner, complete_profile(name))
                .await
                .unwrap();
            ids.push(verify(&db, &agent).await.id);
        }

        let listed = list_public(db.pool(), &ListingFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, ids[1]);

        let asha = get_agent(db.pool(), &ids[0]).await.unwrap();
        let premium = asha
            .standing()
            .apply_admin(&AdminAction::SetPremium(true), Utc::now())
            .unwrap();
        save_standing(db.pool(), &asha, &premium.standing)
            .await
            .unwrap();

        let listed = list_public(db.pool(), &ListingFilter::default()).await.unwrap();
        assert_eq!(listed[0].id, ids[0]);
        assert!(listed[0].premium);
    }

    #[tokio::test]
    async fn test_listing_filters() {
        let db = test_db().await;

        seed_agent(&db, "owner-1").await;
        let mut kochi = complete_profile("Meera Farms");
        kochi.state = "Kerala".to_string();
        kochi.city = "Kochi".to_string();
        kochi.area = "Fort Kochi".to_string();
        kochi.postal_code = "682001".to_string();
        kochi.categories = vec!["agriculture".to_string()];
        let agent = update_profile(db.pool(), "owner-1", kochi).await.unwrap();
        verify(&db, &agent).await;

        seed_agent(&db, "owner-2").await;
        let agent = update_profile(db.pool(), "owner-2", complete_profile("Ravi Homes"))
            .await
            .unwrap();
        verify(&db, &agent).await;

        let by_state = ListingFilter {
            state: Some("kerala".to_string()),
            ..ListingFilter::default()
        };
        let listed = list_public(db.pool(), &by_state).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Meera Farms");

        let by_area = ListingFilter {
            area: Some("fort".to_string()),
            ..ListingFilter::default()
        };
        assert_eq!(list_public(db.pool(), &by_area).await.unwrap().len(), 1);

        let by_pin = ListingFilter {
            postal_code: Some("682".to_string()),
            ..ListingFilter::default()
        };
        assert_eq!(list_public(db.pool(), &by_pin).await.unwrap().len(), 1);

        let by_category = ListingFilter {
            category: Some("real-estate".to_string()),
            ..ListingFilter::default()
        };
        let listed = list_public(db.pool(), &by_category).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Ravi Homes");

        let wildcard = ListingFilter {
            q: Some("%".to_string()),
            ..ListingFilter::default()
        };
        assert!(list_public(db.pool(), &wildcard).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle_counts() {
        let db = test_db().await;
        seed_agent(&db, "owner-1").await;
        seed_agent(&db, "owner-2").await;
        update_profile(db.pool(), "owner-2", complete_profile("Ravi"))
            .await
            .unwrap();

        let (counts, premium) = lifecycle_counts(db.pool()).await.unwrap();
        assert_eq!(counts.get(&LifecycleState::Incomplete), Some(&1));
        assert_eq!(counts.get(&LifecycleState::PendingReview), Some(&1));
        assert_eq!(premium, 0);
    }

    #[tokio::test]
    async fn test_lifecycle_queries_match_standing() {
        let db = test_db().await;
        seed_agent(&db, "owner-1").await;
        for owner in ["owner-2", "owner-3", "owner-4"] {
            seed_agent(&db, owner).await;
            update_profile(db.pool(), owner, complete_profile("Ravi"))
                .await
                .unwrap();
        }

        let verified = verify(&db, &get_agent_by_owner(db.pool(), "owner-3").await.unwrap()).await;
        let premium = verified
            .standing()
            .apply_admin(&AdminAction::SetPremium(true), Utc::now())
            .unwrap();
        save_standing(db.pool(), &verified, &premium.standing)
            .await
            .unwrap();

        let pending = get_agent_by_owner(db.pool(), "owner-4").await.unwrap();
        let rejected = pending
            .standing()
            .apply_admin(
                &AdminAction::Reject {
                    reason: "Unreachable".to_string(),
                },
                Utc::now(),
            )
            .unwrap();
        save_standing(db.pool(), &pending, &rejected.standing)
            .await
            .unwrap();
        // Still rejected after the profile goes incomplete
        let mut partial = complete_profile("Ravi");
        partial.phone.clear();
        update_profile(db.pool(), "owner-4", partial).await.unwrap();

        let (counts, premium) = lifecycle_counts(db.pool()).await.unwrap();
        assert_eq!(premium, 1);
        for (owner, state) in [
            ("owner-1", LifecycleState::Incomplete),
            ("owner-2", LifecycleState::PendingReview),
            ("owner-3", LifecycleState::Verified),
            ("owner-4", LifecycleState::Rejected),
        ] {
            let agent = get_agent_by_owner(db.pool(), owner).await.unwrap();
            assert_eq!(agent.standing().lifecycle_state(), state);
            assert_eq!(counts.get(&state), Some(&1), "{:?}", state);

            let listed = list_by_lifecycle(db.pool(), Some(state)).await.unwrap();
            assert_eq!(listed.len(), 1, "{:?}", state);
            assert_eq!(listed[0].owner_id, owner);
        }
        assert_eq!(list_by_lifecycle(db.pool(), None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_set_avatar() {
        let db = test_db().await;
        seed_agent(&db, "owner-1").await;

        set_avatar(db.pool(), "owner-1", "owner-1/1700000000000-me.png")
            .await
            .unwrap();
        let agent = get_agent_by_owner(db.pool(), "owner-1").await.unwrap();
        assert_eq!(agent.avatar_path.as_deref(), Some("owner-1/1700000000000-me.png"));

        let missing = set_avatar(db.pool(), "nobody", "x.png").await;
        assert!(matches!(missing, Err(DatabaseError::NotFound { .. })));
    }

    #[test]
    fn test_like_escape() {
        assert_eq!(like_escape("50%_off"), "50\\%\\_off");
        assert_eq!(like_escape("plain"), "plain");
    }
}
