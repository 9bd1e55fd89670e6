//! Subscription Model

use serde::{Deserialize, Serialize};

use super::plan::PlanTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum SubscriptionStatus {
    Pending,
    Trialing,
    Active,
    Canceled,
    Expired,
}

/// A user's subscription to a plan. At most one may be active at a time;
/// activation cancels the others in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Subscription {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: i64,
    pub status: SubscriptionStatus,
    pub period_start: Option<i64>,
    pub period_end: Option<i64>,
    /// Payment-processor preference/payment id, when checkout started.
    pub external_reference: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Subscription with plan info (for the dashboard header).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SubscriptionWithPlan {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: i64,
    pub status: SubscriptionStatus,
    pub period_start: Option<i64>,
    pub period_end: Option<i64>,
    pub external_reference: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub plan_tier: PlanTier,
    pub plan_name: String,
    pub plan_price: f64,
}

/// Checkout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub plan_id: i64,
}

/// Checkout result: where to send the buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub subscription_id: i64,
    pub preference_id: String,
    pub init_point: String,
}
