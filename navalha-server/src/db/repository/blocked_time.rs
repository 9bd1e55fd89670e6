//! Blocked Time Repository

use super::{RepoError, RepoResult};
use shared::models::BlockedTime;
use sqlx::{SqliteExecutor, SqlitePool};

const BLOCKED_TIME_SELECT: &str = "SELECT id, shop_id, date, start_time, end_time, reason, recurring, recurrence_type, days_of_week, created_at FROM blocked_times";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BlockedTime>> {
    let sql = format!("{BLOCKED_TIME_SELECT} WHERE id = ?");
    let rule = sqlx::query_as::<_, BlockedTime>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(rule)
}

/// Every rule of a shop. The matcher decides which apply on a given
/// date, so no date filtering happens here.
pub async fn find_by_shop(
    ex: impl SqliteExecutor<'_>,
    shop_id: i64,
) -> RepoResult<Vec<BlockedTime>> {
    let sql = format!("{BLOCKED_TIME_SELECT} WHERE shop_id = ? ORDER BY created_at DESC");
    let rules = sqlx::query_as::<_, BlockedTime>(&sql)
        .bind(shop_id)
        .fetch_all(ex)
        .await?;
    Ok(rules)
}

pub async fn count_by_shop(ex: impl SqliteExecutor<'_>, shop_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blocked_times WHERE shop_id = ?")
        .bind(shop_id)
        .fetch_one(ex)
        .await?;
    Ok(count)
}

/// Insert inside the creation transaction, after policy checks passed.
pub async fn create(ex: impl SqliteExecutor<'_>, rule: &BlockedTime) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO blocked_times (id, shop_id, date, start_time, end_time, reason, recurring, recurrence_type, days_of_week, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .bind(rule.id)
    .bind(rule.shop_id)
    .bind(rule.date)
    .bind(rule.start_time)
    .bind(rule.end_time)
    .bind(&rule.reason)
    .bind(rule.recurring)
    .bind(rule.recurrence_type)
    .bind(&rule.days_of_week)
    .bind(rule.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64, shop_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM blocked_times WHERE id = ? AND shop_id = ?")
        .bind(id)
        .bind(shop_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Blocked time {id} not found")));
    }
    Ok(())
}
