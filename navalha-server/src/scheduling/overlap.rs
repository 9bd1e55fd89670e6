//! Time-range conflict checks for blocked-time rules.

use chrono::Days;

use shared::models::BlockedTime;
use shared::TimeOfDay;

use super::recurrence::rule_applies_on;

/// Closed-interval overlap: ranges that merely touch at an endpoint
/// (10:00-11:00 against 11:00-12:00) count as conflicting.
pub fn ranges_conflict(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Would two rules of the same shop ever block overlapping time on the
/// same date? Used to reject a new rule before it is stored.
///
/// Recurrence decides whether the rules can share a date at all: a
/// one-off pair must be on the same date, a one-off against a recurring
/// rule is checked on the one-off's date, and two recurring rules share
/// a date whenever some weekday satisfies both (daily and weekly
/// patterns repeat within a week, so probing seven days is enough).
pub fn rules_conflict(a: &BlockedTime, b: &BlockedTime) -> bool {
    if !ranges_conflict(a.start_time, a.end_time, b.start_time, b.end_time) {
        return false;
    }

    match (is_recurring(a), is_recurring(b)) {
        (false, false) => a.date == b.date,
        (true, false) => rule_applies_on(a, b.date),
        (false, true) => rule_applies_on(b, a.date),
        (true, true) => (0..7u64).any(|offset| {
            let probe = a.date + Days::new(offset);
            rule_applies_on(a, probe) && rule_applies_on(b, probe)
        }),
    }
}

fn is_recurring(rule: &BlockedTime) -> bool {
    rule.recurring && rule.recurrence_type.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::RecurrenceType;
    use shared::{Weekday, WeekdaySet};

    fn t(text: &str) -> TimeOfDay {
        text.parse().unwrap()
    }

    fn date(text: &str) -> NaiveDate {
        text.parse().unwrap()
    }

    fn make_rule(on: &str, start: &str, end: &str) -> BlockedTime {
        BlockedTime {
            id: 1,
            shop_id: 10,
            date: date(on),
            start_time: t(start),
            end_time: t(end),
            reason: None,
            recurring: false,
            recurrence_type: None,
            days_of_week: None,
            created_at: 0,
        }
    }

    fn weekly(rule: BlockedTime, days: Vec<Weekday>) -> BlockedTime {
        BlockedTime {
            recurring: true,
            recurrence_type: Some(RecurrenceType::Weekly),
            days_of_week: Some(WeekdaySet::from(days)),
            ..rule
        }
    }

    fn daily(rule: BlockedTime) -> BlockedTime {
        BlockedTime {
            recurring: true,
            recurrence_type: Some(RecurrenceType::Daily),
            days_of_week: None,
            ..rule
        }
    }

    #[test]
    fn test_touching_ranges_conflict() {
        assert!(ranges_conflict(
            t("10:00"),
            t("11:00"),
            t("11:00"),
            t("12:00")
        ));
        assert!(ranges_conflict(
            t("11:00"),
            t("12:00"),
            t("10:00"),
            t("11:00")
        ));
    }

    #[test]
    fn test_one_minute_gap_does_not_conflict() {
        assert!(!ranges_conflict(
            t("10:00"),
            t("11:00"),
            t("11:01"),
            t("12:00")
        ));
    }

    #[test]
    fn test_containment_conflicts() {
        assert!(ranges_conflict(
            t("09:00"),
            t("18:00"),
            t("12:00"),
            t("13:00")
        ));
    }

    #[test]
    fn test_one_off_rules_on_different_dates_coexist() {
        let a = make_rule("2026-08-22", "12:00", "13:00");
        let b = make_rule("2026-08-23", "12:00", "13:00");

        assert!(!rules_conflict(&a, &b));
        assert!(rules_conflict(&a, &make_rule("2026-08-22", "12:30", "14:00")));
    }

    #[test]
    fn test_daily_rule_conflicts_with_any_overlapping_one_off() {
        let lunch = daily(make_rule("2026-01-01", "12:00", "13:00"));
        let one_off = make_rule("2026-08-22", "12:30", "14:00");

        assert!(rules_conflict(&lunch, &one_off));
        assert!(rules_conflict(&one_off, &lunch));
        assert!(!rules_conflict(&lunch, &make_rule("2026-08-22", "14:00", "15:00")));
    }

    #[test]
    fn test_weekly_rule_ignores_one_offs_on_other_weekdays() {
        // 2026-08-22 is a Saturday, the 24th a Monday.
        let saturdays = weekly(
            make_rule("2026-01-01", "12:00", "13:00"),
            vec![Weekday::Saturday],
        );

        assert!(rules_conflict(&saturdays, &make_rule("2026-08-22", "12:00", "13:00")));
        assert!(!rules_conflict(&saturdays, &make_rule("2026-08-24", "12:00", "13:00")));
    }

    #[test]
    fn test_weekly_rules_conflict_only_on_shared_days() {
        let base = make_rule("2026-01-01", "12:00", "13:00");
        let saturdays = weekly(base.clone(), vec![Weekday::Saturday]);
        let sundays = weekly(base.clone(), vec![Weekday::Sunday]);
        let weekend = weekly(base.clone(), vec![Weekday::Saturday, Weekday::Sunday]);

        assert!(!rules_conflict(&saturdays, &sundays));
        assert!(rules_conflict(&saturdays, &weekend));
        assert!(rules_conflict(&sundays, &weekend));
    }

    #[test]
    fn test_daily_rule_conflicts_with_weekly_rule() {
        let base = make_rule("2026-01-01", "12:00", "13:00");
        let every_day = daily(base.clone());
        let mondays = weekly(base.clone(), vec![Weekday::Monday]);

        assert!(rules_conflict(&every_day, &mondays));
        assert!(rules_conflict(&mondays, &every_day));
    }

    #[test]
    fn test_non_overlapping_times_never_conflict_regardless_of_recurrence() {
        let base = make_rule("2026-01-01", "08:00", "09:00");
        let every_day = daily(base.clone());
        let also_daily = daily(make_rule("2026-01-01", "09:01", "10:00"));

        assert!(!rules_conflict(&every_day, &also_daily));
    }
}
