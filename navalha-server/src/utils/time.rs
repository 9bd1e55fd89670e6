//! Time helpers for the business timezone.
//!
//! All date-to-timestamp conversion happens at the API handler layer;
//! repositories only ever see `i64` Unix millis.

use chrono::NaiveDate;
use chrono_tz::Tz;
use shared::TimeOfDay;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD).
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Date + wall-clock time -> Unix millis in the business timezone.
///
/// DST gap fallback: if the local time does not exist (spring-forward),
/// fall back to interpreting it as UTC.
pub fn date_time_to_millis(date: NaiveDate, time: TimeOfDay, tz: Tz) -> i64 {
    let naive = date
        .and_hms_opt(u32::from(time.hour()), u32::from(time.minute()), 0)
        .unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of day (00:00:00) -> Unix millis in the business timezone.
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// End of day -> next day 00:00:00 Unix millis. Callers use `< end`.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}

/// Unix millis -> wall-clock time of day in the business timezone.
///
/// `None` only for instants outside chrono's representable range.
pub fn wall_clock_time(millis: i64, tz: Tz) -> Option<TimeOfDay> {
    use chrono::Timelike;
    let dt = chrono::DateTime::from_timestamp_millis(millis)?.with_timezone(&tz);
    TimeOfDay::new(dt.hour() as u8, dt.minute() as u8)
}
