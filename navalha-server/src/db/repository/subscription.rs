//! Subscription Repository

use super::{RepoError, RepoResult};
use shared::models::{Subscription, SubscriptionWithPlan};
use sqlx::{SqliteExecutor, SqlitePool};

const SUBSCRIPTION_SELECT: &str = "SELECT id, user_id, plan_id, status, period_start, period_end, external_reference, created_at, updated_at FROM subscriptions";

const SUBSCRIPTION_WITH_PLAN_SELECT: &str = "SELECT s.id, s.user_id, s.plan_id, s.status, s.period_start, s.period_end, s.external_reference, s.created_at, s.updated_at, p.tier as plan_tier, p.name as plan_name, p.price as plan_price FROM subscriptions s JOIN plans p ON s.plan_id = p.id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Subscription>> {
    let sql = format!("{SUBSCRIPTION_SELECT} WHERE id = ?");
    let subscription = sqlx::query_as::<_, Subscription>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(subscription)
}

/// Dashboard view: the active subscription if any, otherwise the newest.
pub async fn find_current_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Option<SubscriptionWithPlan>> {
    let sql = format!(
        "{SUBSCRIPTION_WITH_PLAN_SELECT} WHERE s.user_id = ? ORDER BY CASE WHEN s.status = 'active' THEN 0 ELSE 1 END, s.created_at DESC LIMIT 1"
    );
    let subscription = sqlx::query_as::<_, SubscriptionWithPlan>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(subscription)
}

/// The entitlement lookup: active status AND unexpired period. Runs
/// inside write transactions so quota checks see committed truth.
pub async fn find_active(
    ex: impl SqliteExecutor<'_>,
    user_id: i64,
    now_millis: i64,
) -> RepoResult<Option<Subscription>> {
    let sql = format!(
        "{SUBSCRIPTION_SELECT} WHERE user_id = ? AND status = 'active' AND period_end IS NOT NULL AND period_end > ? LIMIT 1"
    );
    let subscription = sqlx::query_as::<_, Subscription>(&sql)
        .bind(user_id)
        .bind(now_millis)
        .fetch_optional(ex)
        .await?;
    Ok(subscription)
}

pub async fn create_pending(
    pool: &SqlitePool,
    user_id: i64,
    plan_id: i64,
) -> RepoResult<Subscription> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO subscriptions (id, user_id, plan_id, status, period_start, period_end, external_reference, created_at, updated_at) VALUES (?1, ?2, ?3, 'pending', NULL, NULL, NULL, ?4, ?4)",
    )
    .bind(id)
    .bind(user_id)
    .bind(plan_id)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create subscription".into()))
}

pub async fn set_external_reference(
    pool: &SqlitePool,
    id: i64,
    reference: &str,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE subscriptions SET external_reference = ?, updated_at = ? WHERE id = ?",
    )
    .bind(reference)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Subscription {id} not found")));
    }
    Ok(())
}

/// Cancel every other live subscription of the user. Runs inside the
/// activation transaction so at most one ends up active.
pub async fn cancel_others(
    ex: impl SqliteExecutor<'_>,
    user_id: i64,
    except_id: i64,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE subscriptions SET status = 'canceled', updated_at = ? WHERE user_id = ? AND id != ? AND status IN ('active', 'trialing')",
    )
    .bind(now)
    .bind(user_id)
    .bind(except_id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected())
}

/// Flip the target subscription to active with its billing period.
pub async fn mark_active(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    user_id: i64,
    period_start: i64,
    period_end: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE subscriptions SET status = 'active', period_start = ?, period_end = ?, updated_at = ? WHERE id = ? AND user_id = ?",
    )
    .bind(period_start)
    .bind(period_end)
    .bind(now)
    .bind(id)
    .bind(user_id)
    .execute(ex)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Subscription {id} not found")));
    }
    Ok(())
}

pub async fn cancel_active(pool: &SqlitePool, user_id: i64) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE subscriptions SET status = 'canceled', updated_at = ? WHERE user_id = ? AND status = 'active'",
    )
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Maintenance sweep: active subscriptions whose period ended become
/// expired.
pub async fn expire_overdue(pool: &SqlitePool, now_millis: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE subscriptions SET status = 'expired', updated_at = ? WHERE status = 'active' AND period_end IS NOT NULL AND period_end <= ?",
    )
    .bind(now_millis)
    .bind(now_millis)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
