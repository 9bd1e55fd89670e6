//! Owner Blocked Times Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};

use crate::api::{active_plan_limits, find_owned_shop};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::blocked_time;
use crate::scheduling::{check_block_creation, rules_conflict};
use crate::utils::time::parse_date;
use crate::utils::validation::{MAX_NOTE_LEN, require_field, validate_optional_text};
use crate::utils::{AppError, AppResult};
use shared::TimeOfDay;
use shared::models::{BlockedTime, BlockedTimeCreate, RecurrenceType};
use shared::util::{now_millis, snowflake_id};

/// GET /api/shops/{shop_id}/blockedTimes - rules, newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
) -> AppResult<Json<Vec<BlockedTime>>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;
    let rules = blocked_time::find_by_shop(&state.db.read, shop_id).await?;
    Ok(Json(rules))
}

/// POST /api/shops/{shop_id}/blockedTimes - create a rule
///
/// Checks run in order: field validation (400), plan policy (403),
/// overlap with existing rules (400, message names the conflict). The
/// policy and overlap checks share one write transaction with the
/// INSERT so concurrent creations cannot slip past the quota.
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<i64>,
    Json(payload): Json<BlockedTimeCreate>,
) -> AppResult<(StatusCode, Json<BlockedTime>)> {
    let shop = find_owned_shop(&state.db.read, shop_id, current_user.id).await?;

    let date = parse_date(&require_field(payload.date, "date")?)?;
    let start_time = parse_time_field(payload.start_time, "startTime")?;
    let end_time = parse_time_field(payload.end_time, "endTime")?;
    if end_time <= start_time {
        return Err(AppError::validation("endTime must be after startTime"));
    }
    validate_optional_text(&payload.reason, "reason", MAX_NOTE_LEN)?;

    let mut tx = state
        .db
        .write
        .begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

    let limits = active_plan_limits(&mut tx, current_user.id).await?;
    let count = blocked_time::count_by_shop(&mut *tx, shop_id).await?;
    check_block_creation(
        limits,
        count,
        shop.open_time,
        shop.close_time,
        start_time,
        end_time,
    )?;

    let rule = BlockedTime {
        id: snowflake_id(),
        shop_id,
        date,
        start_time,
        end_time,
        reason: payload.reason,
        recurring: payload.recurring,
        recurrence_type: payload.recurrence_type,
        days_of_week: payload.days_of_week,
        created_at: now_millis(),
    };

    let existing = blocked_time::find_by_shop(&mut *tx, shop_id).await?;
    if let Some(conflict) = existing.iter().find(|other| rules_conflict(&rule, other)) {
        return Err(AppError::validation(format!(
            "Overlaps an existing blocked time: {}",
            describe_rule(conflict)
        )));
    }

    blocked_time::create(&mut *tx, &rule).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;

    tracing::info!(
        shop_id = %shop_id,
        blocked_time_id = %rule.id,
        recurring = %rule.recurring,
        "Blocked time created"
    );

    Ok((StatusCode::CREATED, Json(rule)))
}

/// DELETE /api/shops/{shop_id}/blockedTimes/{id} - remove a rule
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((shop_id, id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    find_owned_shop(&state.db.read, shop_id, current_user.id).await?;
    blocked_time::delete(&state.db.write, id, shop_id).await?;
    Ok(Json(true))
}

fn parse_time_field(value: Option<String>, field: &str) -> AppResult<TimeOfDay> {
    let text = require_field(value, field)?;
    text.parse()
        .map_err(|_| AppError::validation(format!("Invalid {field} format: {text}")))
}

/// Human-readable rule summary for overlap errors.
fn describe_rule(rule: &BlockedTime) -> String {
    let window = format!("{}-{}", rule.start_time, rule.end_time);
    match rule.recurrence_type {
        Some(RecurrenceType::Daily) if rule.recurring => format!("daily {window}"),
        Some(RecurrenceType::Weekly) if rule.recurring => format!("weekly {window}"),
        _ => format!("{} {window}", rule.date),
    }
}
