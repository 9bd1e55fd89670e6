//! Public Storefront Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::booking::{self, NewAppointment};
use crate::core::ServerState;
use crate::db::repository::{appointment, blocked_time, service, shop};
use crate::scheduling::{self, Availability};
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, require_field, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Appointment, AppointmentStatus, BookingRequest, Service, Shop, ShopCard, ShopHours,
};

#[derive(serde::Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(serde::Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

/// GET /api/public/shops?q=xxx - search active shops
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ShopCard>>> {
    let shops = shop::search_public(&state.db.read, query.q.trim()).await?;
    Ok(Json(shops))
}

/// Shop page response (shop + bookable services)
#[derive(serde::Serialize)]
pub struct ShopPage {
    #[serde(flatten)]
    pub shop: Shop,
    pub services: Vec<Service>,
}

/// GET /api/public/shops/{slug} - shop page
pub async fn shop_page(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ShopPage>> {
    let shop = find_public_shop(&state, &slug).await?;
    let services = service::find_active_by_shop(&state.db.read, shop.id).await?;

    Ok(Json(ShopPage { shop, services }))
}

/// Availability response (slot grid + the shop hours that produced it)
#[derive(serde::Serialize)]
pub struct AvailabilityResponse {
    #[serde(flatten)]
    pub availability: Availability,
    pub shop: ShopHours,
}

/// GET /api/public/shops/{slug}/availability?date=YYYY-MM-DD
pub async fn availability(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let date = parse_date(&require_field(query.date, "date")?)?;
    let shop = find_public_shop(&state, &slug).await?;

    let tz = state.config.timezone;
    let day_start = day_start_millis(date, tz);
    let day_end = day_end_millis(date, tz);

    let appointments =
        appointment::find_in_range(&state.db.read, shop.id, day_start, day_end).await?;
    let rules = blocked_time::find_by_shop(&state.db.read, shop.id).await?;

    let availability = scheduling::calculate(&shop, date, &appointments, &rules, tz);

    Ok(Json(AvailabilityResponse {
        availability,
        shop: ShopHours::from(&shop),
    }))
}

/// POST /api/public/shops/{slug}/appointments - book a slot
///
/// Creates a `pending` appointment; the owner confirms it from the
/// dashboard. The slot must be in the current available set, re-checked
/// inside the write transaction.
pub async fn book(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<BookingRequest>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let (date, time, customer_name) =
        booking::parse_booking_fields(payload.date, payload.time, payload.customer_name)?;

    let customer_phone = require_field(payload.customer_phone, "customerPhone")?;
    validate_required_text(&customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.customer_email, "customerEmail", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let shop = find_public_shop(&state, &slug).await?;

    let appointment = booking::book_slot(
        &state,
        &shop,
        NewAppointment {
            date,
            time,
            customer_name,
            customer_phone: Some(customer_phone),
            customer_email: payload.customer_email,
            service_id: payload.service_id,
            notes: payload.notes,
            status: AppointmentStatus::Pending,
            is_manual: false,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

async fn find_public_shop(state: &ServerState, slug: &str) -> AppResult<Shop> {
    shop::find_by_slug(&state.db.read, slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Shop '{slug}'")))
}
