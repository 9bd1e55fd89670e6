//! Plan Repository

use super::RepoResult;
use shared::models::Plan;
use sqlx::{SqliteExecutor, SqlitePool};

const PLAN_SELECT: &str = "SELECT id, tier, name, description, price, max_blocked_times, max_shops, outside_hours_only, position, is_active FROM plans";

pub async fn find_all_active(pool: &SqlitePool) -> RepoResult<Vec<Plan>> {
    let sql = format!("{PLAN_SELECT} WHERE is_active = 1 ORDER BY position");
    let plans = sqlx::query_as::<_, Plan>(&sql).fetch_all(pool).await?;
    Ok(plans)
}

/// Generic over the executor: checkout reads from the pool, quota
/// checks resolve the plan inside the write transaction.
pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Plan>> {
    let sql = format!("{PLAN_SELECT} WHERE id = ?");
    let plan = sqlx::query_as::<_, Plan>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(plan)
}
