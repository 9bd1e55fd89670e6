//! Plan Catalog Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::plan;
use crate::utils::AppResult;
use shared::models::Plan;

/// GET /api/plans - active plans ordered by position
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Plan>>> {
    let plans = plan::find_all_active(&state.db.read).await?;
    Ok(Json(plans))
}
