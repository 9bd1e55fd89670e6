//! Shop Repository

use super::{RepoError, RepoResult};
use shared::models::{Shop, ShopCard, ShopCreate, ShopUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const SHOP_SELECT: &str = "SELECT id, owner_id, name, slug, description, address, phone, photo_path, open_time, close_time, service_duration, is_active, created_at, updated_at FROM shops";

const SHOP_CARD_SELECT: &str = "SELECT id, name, slug, description, address, photo_path, open_time, close_time FROM shops";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Shop>> {
    let sql = format!("{SHOP_SELECT} WHERE id = ?");
    let shop = sqlx::query_as::<_, Shop>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(shop)
}

/// Storefront lookup: active shops only.
pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Shop>> {
    let sql = format!("{SHOP_SELECT} WHERE slug = ? AND is_active = 1");
    let shop = sqlx::query_as::<_, Shop>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(shop)
}

pub async fn find_by_owner(pool: &SqlitePool, owner_id: i64) -> RepoResult<Vec<Shop>> {
    let sql = format!("{SHOP_SELECT} WHERE owner_id = ? AND is_active = 1 ORDER BY created_at");
    let shops = sqlx::query_as::<_, Shop>(&sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await?;
    Ok(shops)
}

/// Storefront search by name, slug or address. Empty query lists all.
pub async fn search_public(pool: &SqlitePool, query: &str) -> RepoResult<Vec<ShopCard>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{SHOP_CARD_SELECT} WHERE is_active = 1 AND (name LIKE ?1 OR slug LIKE ?1 OR address LIKE ?1) ORDER BY name"
    );
    let shops = sqlx::query_as::<_, ShopCard>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(shops)
}

pub async fn count_active_by_owner(
    ex: impl SqliteExecutor<'_>,
    owner_id: i64,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM shops WHERE owner_id = ? AND is_active = 1",
    )
    .bind(owner_id)
    .fetch_one(ex)
    .await?;
    Ok(count)
}

pub async fn slug_exists(ex: impl SqliteExecutor<'_>, slug: &str) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shops WHERE slug = ?")
        .bind(slug)
        .fetch_one(ex)
        .await?;
    Ok(count > 0)
}

/// Insert inside the shop-creation transaction. Caller re-fetches after
/// commit.
pub async fn create(
    ex: impl SqliteExecutor<'_>,
    owner_id: i64,
    data: &ShopCreate,
    slug: &str,
) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO shops (id, owner_id, name, slug, description, address, phone, photo_path, open_time, close_time, service_duration, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL, ?8, ?9, ?10, 1, ?11, ?11)",
    )
    .bind(id)
    .bind(owner_id)
    .bind(&data.name)
    .bind(slug)
    .bind(&data.description)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(data.open_time)
    .bind(data.close_time)
    .bind(data.service_duration)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(id)
}

/// Partial update; `slug` is set when the caller re-derived it from a
/// name change.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &ShopUpdate,
    slug: Option<&str>,
) -> RepoResult<Shop> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE shops SET name = COALESCE(?1, name), slug = COALESCE(?2, slug), description = COALESCE(?3, description), address = COALESCE(?4, address), phone = COALESCE(?5, phone), open_time = COALESCE(?6, open_time), close_time = COALESCE(?7, close_time), service_duration = COALESCE(?8, service_duration), is_active = COALESCE(?9, is_active), updated_at = ?10 WHERE id = ?11",
    )
    .bind(&data.name)
    .bind(slug)
    .bind(&data.description)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(data.open_time)
    .bind(data.close_time)
    .bind(data.service_duration)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Shop {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Shop {id} not found")))
}

pub async fn soft_delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE shops SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Shop {id} not found")));
    }
    Ok(())
}

pub async fn set_photo(pool: &SqlitePool, id: i64, photo_path: &str) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE shops SET photo_path = ?, updated_at = ? WHERE id = ?")
        .bind(photo_path)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Shop {id} not found")));
    }
    Ok(())
}
