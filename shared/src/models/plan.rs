//! Plan Model

use serde::{Deserialize, Serialize};

/// Stable plan identity. Display names ("Básico", "Intermediário",
/// "Avançado") live on the plan row; quota decisions key off this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PlanTier {
    Basic,
    Intermediate,
    Advanced,
}

/// Per-tier quota table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub max_blocked_times: i64,
    pub max_shops: i64,
    /// Básico may only block time outside business hours.
    pub outside_hours_only: bool,
}

impl PlanLimits {
    /// Fallback when a subscription points at a plan that no longer
    /// resolves: the smallest quota, no hours restriction.
    pub const FALLBACK: Self = Self {
        max_blocked_times: 2,
        max_shops: 1,
        outside_hours_only: false,
    };
}

impl PlanTier {
    pub fn limits(self) -> PlanLimits {
        match self {
            Self::Basic => PlanLimits {
                max_blocked_times: 2,
                max_shops: 1,
                outside_hours_only: true,
            },
            Self::Intermediate => PlanLimits {
                max_blocked_times: 10,
                max_shops: 3,
                outside_hours_only: false,
            },
            Self::Advanced => PlanLimits {
                max_blocked_times: 100,
                max_shops: 10,
                outside_hours_only: false,
            },
        }
    }
}

/// Subscription plan row. Monthly price in BRL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Plan {
    pub id: i64,
    pub tier: PlanTier,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub max_blocked_times: i64,
    pub max_shops: i64,
    pub outside_hours_only: bool,
    pub position: i64,
    pub is_active: bool,
}
