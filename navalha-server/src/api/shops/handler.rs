//! Owner Shops Handlers
//!
//! Shop CRUD plus the photo upload. Creation is plan-gated and runs in
//! a write transaction so the quota check and the INSERT are atomic.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use axum::{
    Json,
    extract::{Extension, Multipart, Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::api::find_owned_shop;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::shop;
use crate::scheduling::check_shop_creation;
use crate::utils::slug::slugify;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_business_hours,
    validate_optional_text, validate_required_text, validate_service_duration,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Shop, ShopCreate, ShopUpdate};

/// GET /api/shops - shops owned by the caller
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Shop>>> {
    let shops = shop::find_by_owner(&state.db.read, current_user.id).await?;
    Ok(Json(shops))
}

/// POST /api/shops - create a shop
///
/// Requires an active subscription; the plan's shop quota is re-checked
/// inside the write transaction together with the slug derivation.
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ShopCreate>,
) -> AppResult<(StatusCode, Json<Shop>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_business_hours(payload.open_time, payload.close_time)?;
    validate_service_duration(payload.service_duration)?;

    let mut tx = state
        .db
        .write
        .begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

    let limits = crate::api::active_plan_limits(&mut tx, current_user.id).await?;
    let count = shop::count_active_by_owner(&mut *tx, current_user.id).await?;
    check_shop_creation(limits, count)?;

    let slug = unique_slug(&mut tx, &payload.name).await?;
    let id = shop::create(&mut *tx, current_user.id, &payload, &slug).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;

    let shop = shop::find_by_id(&state.db.read, id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Shop {id} missing after creation")))?;

    tracing::info!(shop_id = %shop.id, owner_id = %current_user.id, slug = %shop.slug, "Shop created");

    Ok((StatusCode::CREATED, Json(shop)))
}

/// GET /api/shops/{shop_id} - owned shop detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
) -> AppResult<Json<Shop>> {
    let shop = find_owned_shop(&state.db.read, shop_id, current_user.id).await?;
    Ok(Json(shop))
}

/// PUT /api/shops/{shop_id} - partial update
///
/// A name change re-derives the slug; hours are validated against the
/// merged (payload over current) values.
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
    Json(payload): Json<ShopUpdate>,
) -> AppResult<Json<Shop>> {
    let shop = find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let open = payload.open_time.unwrap_or(shop.open_time);
    let close = payload.close_time.unwrap_or(shop.close_time);
    validate_business_hours(open, close)?;
    if let Some(duration) = payload.service_duration {
        validate_service_duration(duration)?;
    }

    // Re-derive the slug only when the name lands on a different one,
    // so a cosmetic rename keeps the public URL stable.
    let slug = match &payload.name {
        Some(name) if slugify(name) != shop.slug => {
            let mut conn = state
                .db
                .read
                .acquire()
                .await
                .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
            Some(unique_slug(&mut conn, name).await?)
        }
        _ => None,
    };

    let shop = shop::update(&state.db.write, shop_id, &payload, slug.as_deref()).await?;
    Ok(Json(shop))
}

/// DELETE /api/shops/{shop_id} - soft-delete
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
) -> AppResult<Json<bool>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;
    shop::soft_delete(&state.db.write, shop_id).await?;

    tracing::info!(shop_id = %shop_id, owner_id = %current_user.id, "Shop soft-deleted");

    Ok(Json(true))
}

/// Derive a slug from the name, suffixing -2, -3, ... until unused.
/// The slug column is unique, so a lost race still surfaces as a
/// conflict instead of a duplicate.
async fn unique_slug(conn: &mut sqlx::SqliteConnection, name: &str) -> AppResult<String> {
    let base = slugify(name);
    if !shop::slug_exists(&mut *conn, &base).await? {
        return Ok(base);
    }
    for n in 2..1000 {
        let candidate = format!("{base}-{n}");
        if !shop::slug_exists(&mut *conn, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::conflict(format!("No free slug for name: {name}")))
}

// ========== Photo upload ==========

/// Maximum upload size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted source formats; everything is re-encoded to JPEG.
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for shop photos
const JPEG_QUALITY: u8 = 85;

fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({ext_lower}): {e}"
        )));
    }

    Ok(())
}

fn compress_to_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
    }

    Ok(buffer)
}

/// POST /api/shops/{shop_id}/photo - upload the shop photo
///
/// Accepts a multipart `file` field, re-encodes to JPEG and stores it
/// under the uploads directory, served at `/uploads/*`.
pub async fn upload_photo(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<Shop>> {
    let shop = find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    let uploads_dir = state.uploads_dir();
    fs::create_dir_all(&uploads_dir)
        .map_err(|e| AppError::internal(format!("Failed to create uploads directory: {e}")))?;

    // Find the file field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = field.file_name().map(|s| s.to_string());
            field_data = Some(field.bytes().await?.to_vec());
            break;
        }
    }

    let data = field_data
        .ok_or_else(|| AppError::validation("No 'file' field found. Field name must be 'file'"))?;
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }

    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field"))?;
    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|e| e.to_str().map(|s| s.to_string()))
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {filename}")))?;

    validate_image(&data, &ext)?;
    let compressed = compress_to_jpeg(&data)?;

    let new_filename = format!("{}.jpg", Uuid::new_v4());
    fs::write(uploads_dir.join(&new_filename), &compressed)
        .map_err(|e| AppError::internal(format!("Failed to save file: {e}")))?;

    // Retire the previous photo file, if any.
    if let Some(old) = shop
        .photo_path
        .as_deref()
        .and_then(|p| p.strip_prefix("/uploads/"))
    {
        let _ = fs::remove_file(uploads_dir.join(old));
    }

    let photo_path = format!("/uploads/{new_filename}");
    shop::set_photo(&state.db.write, shop_id, &photo_path).await?;

    tracing::info!(
        shop_id = %shop_id,
        original_name = %filename,
        size = %compressed.len(),
        "Shop photo updated"
    );

    let shop = shop::find_by_id(&state.db.read, shop_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Shop {shop_id}")))?;

    Ok(Json(shop))
}
