//! Transactional appointment creation, shared by the public storefront
//! and the owner dashboard.
//!
//! The write pool holds a single connection, so the availability
//! re-check and the INSERT commit as a unit; concurrent requests for
//! the same slot serialize and the loser gets a conflict. The partial
//! unique index on (shop_id, scheduled_at) backstops confirmed entries
//! at the database level.

use chrono::NaiveDate;

use crate::core::ServerState;
use crate::db::repository::{appointment, blocked_time, service};
use crate::scheduling;
use crate::utils::time::{date_time_to_millis, day_end_millis, day_start_millis, parse_date};
use crate::utils::validation::{MAX_NAME_LEN, require_field, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::TimeOfDay;
use shared::models::{Appointment, AppointmentStatus, Shop};
use shared::util::{now_millis, snowflake_id};

/// A validated appointment request, ready for the slot re-check.
pub struct NewAppointment {
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub service_id: Option<i64>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub is_manual: bool,
}

/// Parse the date / time / customerName trio every booking payload
/// carries. Missing or malformed values name the offending field.
pub fn parse_booking_fields(
    date: Option<String>,
    time: Option<String>,
    customer_name: Option<String>,
) -> AppResult<(NaiveDate, TimeOfDay, String)> {
    let date = parse_date(&require_field(date, "date")?)?;

    let time_text = require_field(time, "time")?;
    let time: TimeOfDay = time_text
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid time format: {time_text}")))?;

    let name = require_field(customer_name, "customerName")?;
    validate_required_text(&name, "customerName", MAX_NAME_LEN)?;

    Ok((date, time, name))
}

/// Re-check the slot inside a write transaction and insert.
pub async fn book_slot(
    state: &ServerState,
    shop: &Shop,
    new: NewAppointment,
) -> AppResult<Appointment> {
    let tz = state.config.timezone;

    if let Some(service_id) = new.service_id {
        service::find_by_id(&state.db.read, service_id)
            .await?
            .filter(|s| s.shop_id == shop.id && s.is_active)
            .ok_or_else(|| AppError::validation(format!("Unknown service: {service_id}")))?;
    }

    let day_start = day_start_millis(new.date, tz);
    let day_end = day_end_millis(new.date, tz);

    let mut tx = state
        .db
        .write
        .begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

    let appointments = appointment::find_in_range(&mut *tx, shop.id, day_start, day_end).await?;
    let rules = blocked_time::find_by_shop(&mut *tx, shop.id).await?;
    let availability = scheduling::calculate(shop, new.date, &appointments, &rules, tz);

    if !availability.available_slots.contains(&new.time) {
        return Err(AppError::conflict(format!(
            "Time slot {} on {} is not available",
            new.time, new.date
        )));
    }

    let now = now_millis();
    let appointment = Appointment {
        id: snowflake_id(),
        shop_id: shop.id,
        service_id: new.service_id,
        customer_name: new.customer_name,
        customer_phone: new.customer_phone,
        customer_email: new.customer_email,
        scheduled_at: date_time_to_millis(new.date, new.time, tz),
        duration_minutes: shop.service_duration,
        status: new.status,
        notes: new.notes,
        is_manual: new.is_manual,
        created_at: now,
        updated_at: now,
    };
    appointment::create(&mut *tx, &appointment).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;

    tracing::info!(
        shop_id = %shop.id,
        appointment_id = %appointment.id,
        scheduled_at = %appointment.scheduled_at,
        status = %appointment.status.as_str(),
        "Appointment created"
    );

    Ok(appointment)
}
