//! Slot grid generation.

use shared::TimeOfDay;

/// Candidate booking slots for one day: opening time, then every
/// `step_minutes` after it, stopping before closing time. The closing
/// time itself is never a slot. A zero step or a window that does not
/// open yields no slots.
pub fn generate_slots(open: TimeOfDay, close: TimeOfDay, step_minutes: u16) -> Vec<TimeOfDay> {
    let mut slots = Vec::new();
    if step_minutes == 0 {
        return slots;
    }

    let mut cursor = Some(open);
    while let Some(slot) = cursor.filter(|s| *s < close) {
        slots.push(slot);
        cursor = slot.checked_add_minutes(step_minutes);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(text: &str) -> TimeOfDay {
        text.parse().unwrap()
    }

    #[test]
    fn test_hourly_grid_spans_business_day() {
        let slots = generate_slots(t("09:00"), t("18:00"), 60);

        assert_eq!(slots.len(), 9);
        assert_eq!(slots.first(), Some(&t("09:00")));
        assert_eq!(slots.last(), Some(&t("17:00")));
    }

    #[test]
    fn test_close_time_is_never_a_slot() {
        let slots = generate_slots(t("09:00"), t("18:00"), 30);

        assert!(slots.iter().all(|s| *s < t("18:00")));
        assert_eq!(slots.last(), Some(&t("17:30")));
    }

    #[test]
    fn test_step_larger_than_window_yields_opening_only() {
        let slots = generate_slots(t("09:00"), t("10:00"), 90);

        assert_eq!(slots, vec![t("09:00")]);
    }

    #[test]
    fn test_closed_or_inverted_window_yields_nothing() {
        assert!(generate_slots(t("18:00"), t("09:00"), 60).is_empty());
        assert!(generate_slots(t("09:00"), t("09:00"), 60).is_empty());
    }

    #[test]
    fn test_zero_step_yields_nothing() {
        assert!(generate_slots(t("09:00"), t("18:00"), 0).is_empty());
    }

    #[test]
    fn test_uneven_step_does_not_overshoot() {
        let slots = generate_slots(t("09:00"), t("10:00"), 45);

        assert_eq!(slots, vec![t("09:00"), t("09:45")]);
    }

    #[test]
    fn test_grid_near_end_of_day_stops_cleanly() {
        let slots = generate_slots(t("23:00"), t("23:59"), 30);

        assert_eq!(slots, vec![t("23:00"), t("23:30")]);
    }
}
