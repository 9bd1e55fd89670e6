//! Appointment Repository

use super::{RepoError, RepoResult};
use shared::models::{Appointment, AppointmentStatus};
use sqlx::{SqliteExecutor, SqlitePool};

const APPOINTMENT_SELECT: &str = "SELECT id, shop_id, service_id, customer_name, customer_phone, customer_email, scheduled_at, duration_minutes, status, notes, is_manual, created_at, updated_at FROM appointments";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Appointment>> {
    let sql = format!("{APPOINTMENT_SELECT} WHERE id = ?");
    let appointment = sqlx::query_as::<_, Appointment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(appointment)
}

/// Appointments of a shop inside a half-open milli range, time-ordered.
/// Runs against the read pool or inside the booking transaction.
pub async fn find_in_range(
    ex: impl SqliteExecutor<'_>,
    shop_id: i64,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<Appointment>> {
    let sql = format!(
        "{APPOINTMENT_SELECT} WHERE shop_id = ? AND scheduled_at >= ? AND scheduled_at < ? ORDER BY scheduled_at"
    );
    let appointments = sqlx::query_as::<_, Appointment>(&sql)
        .bind(shop_id)
        .bind(start_millis)
        .bind(end_millis)
        .fetch_all(ex)
        .await?;
    Ok(appointments)
}

/// Owner agenda listing with optional status and day-range filters.
pub async fn find_by_shop(
    pool: &SqlitePool,
    shop_id: i64,
    status: Option<AppointmentStatus>,
    range: Option<(i64, i64)>,
) -> RepoResult<Vec<Appointment>> {
    let mut sql = format!("{APPOINTMENT_SELECT} WHERE shop_id = ?");
    if status.is_some() {
        sql.push_str(" AND status = ?");
    }
    if range.is_some() {
        sql.push_str(" AND scheduled_at >= ? AND scheduled_at < ?");
    }
    sql.push_str(" ORDER BY scheduled_at");

    let mut query = sqlx::query_as::<_, Appointment>(&sql).bind(shop_id);
    if let Some(status) = status {
        query = query.bind(status);
    }
    if let Some((start, end)) = range {
        query = query.bind(start).bind(end);
    }
    let appointments = query.fetch_all(pool).await?;
    Ok(appointments)
}

/// Insert inside the booking transaction.
pub async fn create(ex: impl SqliteExecutor<'_>, appointment: &Appointment) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO appointments (id, shop_id, service_id, customer_name, customer_phone, customer_email, scheduled_at, duration_minutes, status, notes, is_manual, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )
    .bind(appointment.id)
    .bind(appointment.shop_id)
    .bind(appointment.service_id)
    .bind(&appointment.customer_name)
    .bind(&appointment.customer_phone)
    .bind(&appointment.customer_email)
    .bind(appointment.scheduled_at)
    .bind(appointment.duration_minutes)
    .bind(appointment.status)
    .bind(&appointment.notes)
    .bind(appointment.is_manual)
    .bind(appointment.created_at)
    .bind(appointment.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    shop_id: i64,
    status: AppointmentStatus,
) -> RepoResult<Appointment> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE appointments SET status = ?, updated_at = ? WHERE id = ? AND shop_id = ?",
    )
    .bind(status)
    .bind(now)
    .bind(id)
    .bind(shop_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Appointment {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Appointment {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64, shop_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM appointments WHERE id = ? AND shop_id = ?")
        .bind(id)
        .bind(shop_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Appointment {id} not found")));
    }
    Ok(())
}

/// Bulk removal by filter. Caller guarantees at least one filter is set.
pub async fn delete_filtered(
    pool: &SqlitePool,
    shop_id: i64,
    status: Option<AppointmentStatus>,
    before_millis: Option<i64>,
) -> RepoResult<u64> {
    let mut sql = String::from("DELETE FROM appointments WHERE shop_id = ?");
    if status.is_some() {
        sql.push_str(" AND status = ?");
    }
    if before_millis.is_some() {
        sql.push_str(" AND scheduled_at < ?");
    }

    let mut query = sqlx::query(&sql).bind(shop_id);
    if let Some(status) = status {
        query = query.bind(status);
    }
    if let Some(before) = before_millis {
        query = query.bind(before);
    }
    let rows = query.execute(pool).await?;
    Ok(rows.rows_affected())
}
