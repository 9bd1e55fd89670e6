//! API Route Modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`auth`] - register / login / current user
//! - [`public`] - storefront: search, shop page, availability, booking
//! - [`shops`] - owner shop management
//! - [`services`] - owner service catalog
//! - [`appointments`] - owner appointment agenda
//! - [`blocked_times`] - owner blocked-time rules
//! - [`plans`] - plan catalog
//! - [`subscriptions`] - subscription lifecycle and checkout

pub mod booking;

pub mod auth;
pub mod health;
pub mod public;

// Owner dashboard API
pub mod appointments;
pub mod blocked_times;
pub mod services;
pub mod shops;

// Billing API
pub mod plans;
pub mod subscriptions;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

use sqlx::SqlitePool;

use crate::utils::AppError;

/// Fetch a shop and verify the caller owns it.
///
/// Unknown shop is 404; a shop belonging to someone else is 403. Every
/// `/api/shops/{shop_id}/...` handler goes through here first.
pub(crate) async fn find_owned_shop(
    pool: &SqlitePool,
    shop_id: i64,
    user_id: i64,
) -> Result<shared::models::Shop, AppError> {
    let shop = crate::db::repository::shop::find_by_id(pool, shop_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Shop {shop_id}")))?;

    if shop.owner_id != user_id {
        return Err(AppError::forbidden("You do not own this shop"));
    }

    Ok(shop)
}

/// Resolve the caller's plan limits for quota checks.
///
/// `None` when there is no active subscription. An active subscription
/// whose plan no longer resolves falls back to the smallest quota
/// instead of locking the owner out.
pub(crate) async fn active_plan_limits(
    conn: &mut sqlx::SqliteConnection,
    user_id: i64,
) -> Result<Option<shared::models::PlanLimits>, AppError> {
    use crate::db::repository::{plan, subscription};
    use shared::models::PlanLimits;

    let Some(active) =
        subscription::find_active(&mut *conn, user_id, shared::util::now_millis()).await?
    else {
        return Ok(None);
    };

    let limits = plan::find_by_id(&mut *conn, active.plan_id)
        .await?
        .map(|p| p.tier.limits())
        .unwrap_or(PlanLimits::FALLBACK);

    Ok(Some(limits))
}
