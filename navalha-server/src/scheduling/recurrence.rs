//! Blocked-time recurrence matching.

use chrono::{Datelike, NaiveDate};
use shared::Weekday;
use shared::models::{BlockedTime, RecurrenceType};

/// Does this rule carve time out of the given date?
///
/// One-off rules match their stored date only. Daily rules match every
/// date, weekly rules the dates whose weekday is in their day set. A
/// recurring rule with no recurrence type never matches, so a malformed
/// row fails open rather than blocking the whole calendar.
pub fn rule_applies_on(rule: &BlockedTime, date: NaiveDate) -> bool {
    if !rule.recurring {
        return rule.date == date;
    }

    match rule.recurrence_type {
        Some(RecurrenceType::Daily) => true,
        Some(RecurrenceType::Weekly) => {
            let day = Weekday::from_chrono(date.weekday());
            rule.days_of_week
                .as_ref()
                .is_some_and(|days| days.contains(day))
        }
        None => false,
    }
}
