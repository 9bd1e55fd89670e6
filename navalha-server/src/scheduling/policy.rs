//! Plan-tier gates for owner-side creation flows.

use thiserror::Error;

use shared::TimeOfDay;
use shared::models::PlanLimits;

use crate::utils::AppError;

/// Why a creation request was refused before touching the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("An active subscription is required for this action")]
    PlanRequired,
    #[error("Plan limit reached: at most {limit} blocked times")]
    BlockQuotaExceeded { limit: i64 },
    #[error("Plan limit reached: at most {limit} shops")]
    ShopQuotaExceeded { limit: i64 },
    #[error("Current plan only allows blocking time outside business hours")]
    InsideBusinessHours,
}

impl From<PolicyViolation> for AppError {
    fn from(violation: PolicyViolation) -> Self {
        AppError::forbidden(violation.to_string())
    }
}

/// Gate a new blocked-time rule by the owner's plan.
///
/// `limits` is `None` when the owner has no active subscription. The
/// hours gate refuses ranges lying entirely inside business hours;
/// a range that starts before opening or ends after closing passes.
pub fn check_block_creation(
    limits: Option<PlanLimits>,
    existing_count: i64,
    open: TimeOfDay,
    close: TimeOfDay,
    start: TimeOfDay,
    end: TimeOfDay,
) -> Result<(), PolicyViolation> {
    let Some(limits) = limits else {
        return Err(PolicyViolation::PlanRequired);
    };

    if existing_count >= limits.max_blocked_times {
        return Err(PolicyViolation::BlockQuotaExceeded {
            limit: limits.max_blocked_times,
        });
    }

    if limits.outside_hours_only && start >= open && end <= close {
        return Err(PolicyViolation::InsideBusinessHours);
    }

    Ok(())
}

/// Gate a new shop by the owner's plan.
pub fn check_shop_creation(
    limits: Option<PlanLimits>,
    existing_count: i64,
) -> Result<(), PolicyViolation> {
    let Some(limits) = limits else {
        return Err(PolicyViolation::PlanRequired);
    };

    if existing_count >= limits.max_shops {
        return Err(PolicyViolation::ShopQuotaExceeded {
            limit: limits.max_shops,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PlanTier;

    fn t(text: &str) -> TimeOfDay {
        text.parse().unwrap()
    }

    fn check(limits: Option<PlanLimits>, count: i64, start: &str, end: &str) -> Result<(), PolicyViolation> {
        check_block_creation(limits, count, t("09:00"), t("18:00"), t(start), t(end))
    }

    #[test]
    fn test_no_subscription_is_refused() {
        assert_eq!(check(None, 0, "19:00", "20:00"), Err(PolicyViolation::PlanRequired));
        assert_eq!(
            check_shop_creation(None, 0),
            Err(PolicyViolation::PlanRequired)
        );
    }

    #[test]
    fn test_basic_tier_stops_at_two_blocks() {
        let limits = Some(PlanTier::Basic.limits());

        assert_eq!(check(limits, 1, "19:00", "20:00"), Ok(()));
        assert_eq!(
            check(limits, 2, "19:00", "20:00"),
            Err(PolicyViolation::BlockQuotaExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_basic_tier_refuses_blocks_inside_business_hours() {
        let limits = Some(PlanTier::Basic.limits());

        assert_eq!(
            check(limits, 0, "12:00", "13:00"),
            Err(PolicyViolation::InsideBusinessHours)
        );
        // Straddling either boundary escapes the gate.
        assert_eq!(check(limits, 0, "08:00", "09:30"), Ok(()));
        assert_eq!(check(limits, 0, "17:30", "18:30"), Ok(()));
        assert_eq!(check(limits, 0, "19:00", "20:00"), Ok(()));
    }

    #[test]
    fn test_higher_tiers_may_block_inside_business_hours() {
        let limits = Some(PlanTier::Intermediate.limits());

        assert_eq!(check(limits, 0, "12:00", "13:00"), Ok(()));
        assert_eq!(
            check(limits, 10, "12:00", "13:00"),
            Err(PolicyViolation::BlockQuotaExceeded { limit: 10 })
        );
    }

    #[test]
    fn test_fallback_limits_apply_strictest_quota() {
        let limits = Some(PlanLimits::FALLBACK);

        assert_eq!(check(limits, 1, "12:00", "13:00"), Ok(()));
        assert_eq!(
            check(limits, 2, "12:00", "13:00"),
            Err(PolicyViolation::BlockQuotaExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_shop_quota_follows_tier() {
        assert_eq!(check_shop_creation(Some(PlanTier::Basic.limits()), 0), Ok(()));
        assert_eq!(
            check_shop_creation(Some(PlanTier::Basic.limits()), 1),
            Err(PolicyViolation::ShopQuotaExceeded { limit: 1 })
        );
        assert_eq!(check_shop_creation(Some(PlanTier::Advanced.limits()), 9), Ok(()));
        assert_eq!(
            check_shop_creation(Some(PlanTier::Advanced.limits()), 10),
            Err(PolicyViolation::ShopQuotaExceeded { limit: 10 })
        );
    }
}
