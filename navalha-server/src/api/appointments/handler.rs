//! Owner Appointments Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};

use crate::api::booking::{self, NewAppointment};
use crate::api::find_owned_shop;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::appointment;
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Appointment, AppointmentStatus, AppointmentStatusUpdate, ManualAppointmentCreate,
};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(serde::Deserialize)]
pub struct BulkDeleteQuery {
    pub status: Option<AppointmentStatus>,
    /// Everything scheduled before this date (YYYY-MM-DD).
    pub before: Option<String>,
}

#[derive(serde::Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

/// GET /api/shops/{shop_id}/appointments?date=&status= - agenda
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Appointment>>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    let range = match query.date {
        Some(date) => {
            let date = parse_date(&date)?;
            let tz = state.config.timezone;
            Some((day_start_millis(date, tz), day_end_millis(date, tz)))
        }
        None => None,
    };

    let appointments =
        appointment::find_by_shop(&state.db.read, shop_id, query.status, range).await?;
    Ok(Json(appointments))
}

/// POST /api/shops/{shop_id}/appointments - manual entry
///
/// Walk-ins and phone bookings go straight to `confirmed`, which
/// occupies the slot, so the same transactional re-check applies.
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
    Json(payload): Json<ManualAppointmentCreate>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let shop = find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    let (date, time, customer_name) =
        booking::parse_booking_fields(payload.date, payload.time, payload.customer_name)?;
    validate_optional_text(&payload.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.customer_email, "customerEmail", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let appointment = booking::book_slot(
        &state,
        &shop,
        NewAppointment {
            date,
            time,
            customer_name,
            customer_phone: payload.customer_phone,
            customer_email: payload.customer_email,
            service_id: payload.service_id,
            notes: payload.notes,
            status: AppointmentStatus::Confirmed,
            is_manual: true,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// PUT /api/shops/{shop_id}/appointments/{id}/status - transition
///
/// Confirming a pending appointment can collide with another confirmed
/// entry at the same instant; the partial unique index turns that into
/// a conflict.
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((shop_id, id)): Path<(i64, i64)>,
    Json(payload): Json<AppointmentStatusUpdate>,
) -> AppResult<Json<Appointment>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    let appointment =
        appointment::update_status(&state.db.write, id, shop_id, payload.status).await?;

    tracing::info!(
        shop_id = %shop_id,
        appointment_id = %id,
        status = %payload.status.as_str(),
        "Appointment status updated"
    );

    Ok(Json(appointment))
}

/// DELETE /api/shops/{shop_id}/appointments/{id} - remove manual entry
///
/// Customer bookings keep their history; only owner-created entries can
/// be removed one by one.
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((shop_id, id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    let appointment = appointment::find_by_id(&state.db.read, id)
        .await?
        .filter(|a| a.shop_id == shop_id)
        .ok_or_else(|| AppError::not_found(format!("Appointment {id}")))?;

    if !appointment.is_manual {
        return Err(AppError::forbidden("Only manual entries can be removed"));
    }

    appointment::delete(&state.db.write, id, shop_id).await?;
    Ok(Json(true))
}

/// DELETE /api/shops/{shop_id}/appointments?status=&before= - bulk removal
pub async fn bulk_delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
    Query(query): Query<BulkDeleteQuery>,
) -> AppResult<Json<BulkDeleteResponse>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    if query.status.is_none() && query.before.is_none() {
        return Err(AppError::validation(
            "At least one filter (status, before) is required",
        ));
    }

    let before_millis = match query.before {
        Some(date) => Some(day_start_millis(
            parse_date(&date)?,
            state.config.timezone,
        )),
        None => None,
    };

    let deleted =
        appointment::delete_filtered(&state.db.write, shop_id, query.status, before_millis).await?;

    tracing::info!(shop_id = %shop_id, deleted = %deleted, "Appointments bulk-deleted");

    Ok(Json(BulkDeleteResponse { deleted }))
}
