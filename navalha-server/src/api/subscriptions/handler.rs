//! Subscriptions Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{plan, subscription};
use crate::utils::{AppError, AppResult};
use shared::models::{
    CheckoutRequest, CheckoutResponse, SubscriptionStatus, SubscriptionWithPlan,
};
use shared::util::now_millis;

/// Billing period granted per confirmed payment.
const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

/// GET /api/subscriptions/current - my subscription + plan (or null)
pub async fn current(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Option<SubscriptionWithPlan>>> {
    let subscription =
        subscription::find_current_by_user(&state.db.read, current_user.id).await?;
    Ok(Json(subscription))
}

/// POST /api/subscriptions/checkout - start checkout for a plan
///
/// Creates a `pending` subscription, then asks the payment processor
/// for a checkout preference carrying the subscription id as external
/// reference. The caller redirects the buyer to `init_point`.
pub async fn checkout(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let plan = plan::find_by_id(&state.db.read, payload.plan_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Plan {}", payload.plan_id)))?;

    let sub = subscription::create_pending(&state.db.write, current_user.id, plan.id).await?;

    let preference = state
        .billing
        .create_checkout_preference(&plan, &current_user.email, &sub.id.to_string())
        .await?;

    subscription::set_external_reference(&state.db.write, sub.id, &preference.id).await?;

    tracing::info!(
        user_id = %current_user.id,
        subscription_id = %sub.id,
        plan_id = %plan.id,
        preference_id = %preference.id,
        "Checkout started"
    );

    Ok(Json(CheckoutResponse {
        subscription_id: sub.id,
        preference_id: preference.id,
        init_point: preference.init_point,
    }))
}

/// POST /api/subscriptions/{id}/activate - confirm a paid checkout
///
/// Back-URL flow: the storefront calls this after the processor
/// redirects with an approved payment. Cancelling every other live
/// subscription and activating this one commit together, so at most
/// one subscription per user is ever active.
pub async fn activate(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<SubscriptionWithPlan>> {
    let sub = subscription::find_by_id(&state.db.read, id)
        .await?
        .filter(|s| s.user_id == current_user.id)
        .ok_or_else(|| AppError::not_found(format!("Subscription {id}")))?;

    match sub.status {
        // A duplicate back-URL hit lands here; nothing left to do.
        SubscriptionStatus::Active => {}
        SubscriptionStatus::Pending | SubscriptionStatus::Trialing => {
            let now = now_millis();
            let period_end = now + SUBSCRIPTION_PERIOD_DAYS * 24 * 60 * 60 * 1000;

            let mut tx = state
                .db
                .write
                .begin()
                .await
                .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

            subscription::cancel_others(&mut *tx, current_user.id, id).await?;
            subscription::mark_active(&mut *tx, id, current_user.id, now, period_end).await?;

            tx.commit()
                .await
                .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;

            tracing::info!(
                user_id = %current_user.id,
                subscription_id = %id,
                period_end = %period_end,
                "Subscription activated"
            );
        }
        SubscriptionStatus::Canceled | SubscriptionStatus::Expired => {
            return Err(AppError::business_rule(format!(
                "Subscription {id} cannot be activated"
            )));
        }
    }

    let subscription = subscription::find_current_by_user(&state.db.read, current_user.id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Subscription {id} missing after activation")))?;

    Ok(Json(subscription))
}

/// POST /api/subscriptions/cancel - cancel my active subscription
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<bool>> {
    let cancelled = subscription::cancel_active(&state.db.write, current_user.id).await?;
    if cancelled == 0 {
        return Err(AppError::not_found("No active subscription"));
    }

    tracing::info!(user_id = %current_user.id, "Subscription cancelled");

    Ok(Json(true))
}
