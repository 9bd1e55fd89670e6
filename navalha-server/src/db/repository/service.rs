//! Service Repository (per-shop catalog)

use super::{RepoError, RepoResult};
use shared::models::{Service, ServiceCreate, ServiceUpdate};
use sqlx::SqlitePool;

const SERVICE_SELECT: &str = "SELECT id, shop_id, name, description, price, duration_minutes, position, is_active, created_at, updated_at FROM services";

fn validate_price(price: f64) -> RepoResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(RepoError::Validation(format!(
            "price cannot be negative: {price}"
        )));
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Service>> {
    let sql = format!("{SERVICE_SELECT} WHERE id = ?");
    let service = sqlx::query_as::<_, Service>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(service)
}

/// Owner view: every service of the shop, inactive included.
pub async fn find_by_shop(pool: &SqlitePool, shop_id: i64) -> RepoResult<Vec<Service>> {
    let sql = format!("{SERVICE_SELECT} WHERE shop_id = ? ORDER BY position, created_at");
    let services = sqlx::query_as::<_, Service>(&sql)
        .bind(shop_id)
        .fetch_all(pool)
        .await?;
    Ok(services)
}

/// Storefront view: active services only.
pub async fn find_active_by_shop(pool: &SqlitePool, shop_id: i64) -> RepoResult<Vec<Service>> {
    let sql = format!(
        "{SERVICE_SELECT} WHERE shop_id = ? AND is_active = 1 ORDER BY position, created_at"
    );
    let services = sqlx::query_as::<_, Service>(&sql)
        .bind(shop_id)
        .fetch_all(pool)
        .await?;
    Ok(services)
}

pub async fn create(pool: &SqlitePool, shop_id: i64, data: &ServiceCreate) -> RepoResult<Service> {
    validate_price(data.price)?;
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO services (id, shop_id, name, description, price, duration_minutes, position, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
    )
    .bind(id)
    .bind(shop_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.duration_minutes)
    .bind(data.position.unwrap_or(0))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create service".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    shop_id: i64,
    data: &ServiceUpdate,
) -> RepoResult<Service> {
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE services SET name = COALESCE(?1, name), description = COALESCE(?2, description), price = COALESCE(?3, price), duration_minutes = COALESCE(?4, duration_minutes), position = COALESCE(?5, position), is_active = COALESCE(?6, is_active), updated_at = ?7 WHERE id = ?8 AND shop_id = ?9",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.duration_minutes)
    .bind(data.position)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .bind(shop_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Service {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Service {id} not found")))
}

pub async fn soft_delete(pool: &SqlitePool, id: i64, shop_id: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE services SET is_active = 0, updated_at = ? WHERE id = ? AND shop_id = ?",
    )
    .bind(now)
    .bind(id)
    .bind(shop_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Service {id} not found")));
    }
    Ok(())
}
