//! Owner Service Catalog Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};

use crate::api::find_owned_shop;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::service;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use shared::models::{Service, ServiceCreate, ServiceUpdate};

/// GET /api/shops/{shop_id}/services - owner view, inactive included
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
) -> AppResult<Json<Vec<Service>>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;
    let services = service::find_by_shop(&state.db.read, shop_id).await?;
    Ok(Json(services))
}

/// POST /api/shops/{shop_id}/services - add a service
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<(StatusCode, Json<Service>)> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let service = service::create(&state.db.write, shop_id, &payload).await?;

    tracing::info!(shop_id = %shop_id, service_id = %service.id, "Service created");

    Ok((StatusCode::CREATED, Json(service)))
}

/// PUT /api/shops/{shop_id}/services/{id} - update a service
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((shop_id, id)): Path<(i64, i64)>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<Service>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let service = service::update(&state.db.write, id, shop_id, &payload).await?;
    Ok(Json(service))
}

/// DELETE /api/shops/{shop_id}/services/{id} - soft-delete a service
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((shop_id, id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;
    service::soft_delete(&state.db.write, id, shop_id).await?;
    Ok(Json(true))
}
