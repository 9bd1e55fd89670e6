//! Day availability for a shop.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use shared::TimeOfDay;
use shared::models::{Appointment, BlockedTime, Shop};

use crate::utils::time::wall_clock_time;

use super::recurrence::rule_applies_on;
use super::slots::generate_slots;

/// What a storefront sees for one date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available_slots: Vec<TimeOfDay>,
    pub booked_times: Vec<TimeOfDay>,
}

/// Compute the bookable slots for a date.
///
/// `appointments` must already be the date's rows; `rules` are all of
/// the shop's blocked times, matched against the date here. A slot is
/// dropped when a confirmed or completed appointment starts at it, or
/// when an applicable rule covers it. The rule check is a point check
/// including both endpoints, so a 12:00-13:00 block removes the 12:00
/// and the 13:00 slot but leaves 11:00 alone.
pub fn calculate(
    shop: &Shop,
    date: NaiveDate,
    appointments: &[Appointment],
    rules: &[BlockedTime],
    tz: Tz,
) -> Availability {
    let step = u16::try_from(shop.service_duration).unwrap_or(0);
    let slots = generate_slots(shop.open_time, shop.close_time, step);

    let mut booked_times: Vec<TimeOfDay> = appointments
        .iter()
        .filter(|appt| appt.status.is_booked())
        .filter_map(|appt| wall_clock_time(appt.scheduled_at, tz))
        .collect();
    booked_times.sort_unstable();
    booked_times.dedup();

    let blocked: Vec<&BlockedTime> = rules
        .iter()
        .filter(|rule| rule_applies_on(rule, date))
        .collect();

    let available_slots = slots
        .into_iter()
        .filter(|slot| !booked_times.contains(slot))
        .filter(|slot| {
            !blocked
                .iter()
                .any(|rule| rule.start_time <= *slot && *slot <= rule.end_time)
        })
        .collect();

    Availability {
        available_slots,
        booked_times,
    }
}
